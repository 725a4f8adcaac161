//! Common utilities shared across CLI commands.
//!
//! Input acquisition, document loading and atomic output writing.

use anyhow::{Context, Result};
use objgen_core::Error;
use objgen_core::cli::{ExitCode, InputSource, OutputTarget};
use objgen_model::{ObjectDefinition, ObjectOptions, parse_document};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Maps a failed run to the exit code reported to the shell.
///
/// The first generator [`Error`] found in the context chain decides; any
/// other failure is a plain [`ExitCode::ERROR`].
///
/// # Examples
///
/// ```
/// use anyhow::Context;
/// use objgen_cli::commands::common::exit_code_for;
/// use objgen_core::Error;
/// use objgen_core::cli::ExitCode;
///
/// let err = Err::<(), _>(Error::InvalidArgument("bad".into()))
///     .context("invalid generation options")
///     .unwrap_err();
/// assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
/// assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), ExitCode::ERROR);
/// ```
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

/// Reads the whole object definition document.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file or standard input cannot be read.
pub fn read_input(source: &InputSource) -> Result<String> {
    let content = match source {
        InputSource::Stdin => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|source| Error::Io {
                    context: "reading standard input".to_string(),
                    source,
                })?;
            content
        }
        InputSource::File(path) => std::fs::read_to_string(path).map_err(|source| Error::Io {
            context: format!("reading {}", path.display()),
            source,
        })?,
    };
    debug!("Read {} bytes from {source}", content.len());
    Ok(content)
}

/// Reads and validates the object described by `source`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the document is invalid.
pub fn load_object(source: &InputSource, options: &ObjectOptions) -> Result<ObjectDefinition> {
    let xml = read_input(source)?;
    let document = parse_document(&xml).with_context(|| format!("cannot parse {source}"))?;
    let object = ObjectDefinition::from_document(&document, options)
        .with_context(|| format!("invalid object definition in {source}"))?;
    Ok(object)
}

/// Writes `content` to the target.
///
/// Files are replaced atomically: the text goes to a temporary file in the
/// destination directory which is then renamed over the target, so a failed
/// run never leaves a truncated file behind. A replaced file keeps its mode;
/// a new file gets the mode a plain create would give it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the temporary file cannot be created, written or
/// persisted, or if standard output is closed.
pub fn write_output(target: &OutputTarget, content: &str) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| Error::Io {
                    context: "writing standard output".to_string(),
                    source,
                })?;
        }
        OutputTarget::File(path) => write_file_atomically(path, content)?,
    }
    Ok(())
}

fn write_file_atomically(path: &Path, content: &str) -> Result<(), Error> {
    let io_error = |source| Error::Io {
        context: format!("writing {}", path.display()),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut file = new_temp_file(dir).map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions).map_err(io_error)?;
    }
    file.persist(path).map_err(|e| io_error(e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Temporary file created with `0o666` minus the umask instead of `0o600`.
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DOCUMENT: &str = r#"<LWM2M><Object ObjectType="MODefinition">
        <Name>Demo</Name><ObjectID>32769</ObjectID>
        <MultipleInstances>Single</MultipleInstances><Mandatory>Optional</Mandatory>
        <Resources>
          <Item ID="1"><Name>Value</Name><Operations>R</Operations>
            <MultipleInstances>Single</MultipleInstances><Mandatory>Mandatory</Mandatory>
            <Type>Integer</Type></Item>
        </Resources>
        </Object></LWM2M>"#;

    #[test]
    fn test_exit_code_for_wrapped_errors() {
        let io = anyhow::Error::from(Error::Io {
            context: "writing demo.c".to_string(),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(exit_code_for(&io), ExitCode::ERROR);

        let conflict = Err::<(), _>(Error::ConflictingResourceInstances {
            rid: 7,
            first: 3,
            second: 5,
        })
        .context("invalid generation options")
        .unwrap_err();
        assert_eq!(exit_code_for(&conflict), ExitCode::INVALID_INPUT);

        let template = anyhow::Error::from(Error::TemplateMissing {
            name: "single_instance".to_string(),
        });
        assert_eq!(exit_code_for(&template), ExitCode::ERROR);
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.xml");
        std::fs::write(&path, DOCUMENT).unwrap();

        let content = read_input(&InputSource::File(path)).unwrap();
        assert_eq!(content, DOCUMENT);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(&InputSource::File(PathBuf::from("/nonexistent/demo.xml")))
            .unwrap_err();
        let err = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.xml");
        std::fs::write(&path, DOCUMENT).unwrap();

        let object = load_object(&InputSource::File(path), &ObjectOptions::default()).unwrap();
        assert_eq!(object.id(), 32769);
        assert_eq!(object.resources().len(), 1);
    }

    #[test]
    fn test_load_object_keeps_error_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<LWM2M><Object>").unwrap();

        let err = load_object(&InputSource::File(path), &ObjectOptions::default()).unwrap_err();
        assert!(err.downcast_ref::<Error>().unwrap().is_input_error());
    }

    #[test]
    fn test_write_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.c");

        write_output(&OutputTarget::File(path.clone()), "int x;\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "int x;\n");
    }

    #[test]
    fn test_write_output_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.c");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();

        write_output(&OutputTarget::File(path.clone()), "new\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
        // no temporary files left next to the target
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_keeps_file_modes() {
        use std::os::unix::fs::PermissionsExt;

        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;
        let dir = tempfile::tempdir().unwrap();

        let existing = dir.path().join("existing.c");
        std::fs::write(&existing, "old\n").unwrap();
        std::fs::set_permissions(&existing, std::fs::Permissions::from_mode(0o644)).unwrap();
        write_output(&OutputTarget::File(existing.clone()), "new\n").unwrap();
        assert_eq!(mode(&existing), 0o644);

        // a new file follows the umask like any plain create
        let reference = dir.path().join("reference.c");
        std::fs::write(&reference, "").unwrap();
        let fresh = dir.path().join("fresh.c");
        write_output(&OutputTarget::File(fresh.clone()), "new\n").unwrap();
        assert_eq!(mode(&fresh), mode(&reference));
    }

    #[test]
    fn test_write_output_missing_directory() {
        let path = PathBuf::from("/nonexistent/objgen/demo.c");
        let err = write_output(&OutputTarget::File(path), "x").unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Io { .. })));
    }
}
