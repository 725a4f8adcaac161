//! Template context built from an object definition.
//!
//! Templates never see the model types directly. [`ObjectContext`] flattens
//! an [`ObjectDefinition`] plus a [`GenerationConfig`] into plain,
//! serializable values: names in every case the C code needs, the resource
//! kind and type constants, storage declarations and the statements that
//! move values between instance storage and `anj_res_value_t`.

use crate::config::{GenerationConfig, InstanceCount};
use chrono::NaiveDateTime;
use objgen_model::{ObjectDefinition, ResourceDefinition, ValueType};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Width used when wrapping description text into C comments.
pub const DESCRIPTION_WIDTH: usize = 70;

/// Timestamp format of the generated file header.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Root value handed to the templates.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize)]
pub struct ObjectContext {
    /// Object being generated
    pub obj: ObjectView,
    /// Emit transaction handlers
    pub transactional: bool,
    /// Resource instances are created and deleted at runtime
    pub dynamic_resources_instances: bool,
    /// Object instances are created and deleted at runtime
    pub dynamic_object_instances: bool,
    /// Number of object instance slots
    pub instances_number: u16,
    /// `0..instances_number`
    pub instance_indices: Vec<u16>,
    /// Generation timestamp
    pub date_time: String,
    /// Tool name and version for the header comment
    pub generator: String,
    /// `res_inst_create`/`res_inst_delete` are emitted
    pub res_inst_handlers: bool,
    /// At least one handler is emitted
    pub has_handlers: bool,
}

/// Object-level template values.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize)]
pub struct ObjectView {
    /// Object ID
    pub id: u16,
    /// Human-readable name
    pub name: String,
    /// Object version, `1.0` when the document omits it
    pub version: String,
    /// Object URN
    pub urn: String,
    /// Description wrapped for a comment block
    pub description_lines: Vec<String>,
    /// `Single` or `Multiple`
    pub multiple_str: &'static str,
    /// `Optional` or `Mandatory`
    pub mandatory_str: &'static str,
    /// `snake_case` name
    pub name_snake: String,
    /// `UPPER_SNAKE` name
    pub name_upper: String,
    /// `PascalCase` name
    pub name_pascal: String,
    /// Resources in ascending ID order
    pub resources: Vec<ResourceView>,
    /// Number of resources
    pub resource_count: usize,
    /// At least one readable resource
    pub has_readable: bool,
    /// At least one writable resource
    pub has_writable: bool,
    /// At least one executable resource
    pub has_executable: bool,
    /// At least one multiple-instance resource
    pub has_multiple_resources: bool,
    /// `inst_reset` handler is emitted
    pub needs_inst_reset: bool,
    /// Instance storage has at least one member
    pub has_storage: bool,
}

/// Resource-level template values.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize)]
pub struct ResourceView {
    /// Resource ID
    pub id: u16,
    /// Human-readable name
    pub name: String,
    /// `UPPER_SNAKE` name, unique within the object
    pub name_upper: String,
    /// `snake_case` name, unique within the object
    pub name_snake: String,
    /// `anj_dm_res_kind_t` constant
    pub kind_enum: String,
    /// `anj_data_type_t` constant
    pub type_enum: &'static str,
    /// Type literal from the document
    pub value_type: &'static str,
    /// Operations literal (`R`, `RW`, ...)
    pub operations: &'static str,
    /// `Optional` or `Mandatory`
    pub mandatory_str: &'static str,
    /// `Single` or `Multiple`
    pub multiple_str: &'static str,
    /// Range or enumeration, `N/A` when empty
    pub range_enumeration: String,
    /// Units, `N/A` when empty
    pub units: String,
    /// Description wrapped for a comment block
    pub description_lines: Vec<String>,
    /// Readable
    pub readable: bool,
    /// Writable
    pub writable: bool,
    /// Executable
    pub executable: bool,
    /// Multiple-instance resource
    pub multiple: bool,
    /// Resource instance slots (0 for single-instance resources)
    pub instance_count: u16,
    /// Resource instance IDs present after initialization
    pub instance_indices: Vec<u16>,
    /// `anj_res_value_t` field carrying the value
    pub value_field: Option<&'static str>,
    /// Member declarations inside the instance struct
    pub storage: Vec<String>,
    /// Value arrays shifted when resource instances come and go
    pub value_arrays: Vec<String>,
    /// Body of the `res_read` case
    pub read_code: Vec<String>,
    /// Body of the `res_write` case
    pub write_code: Vec<String>,
}

impl ObjectContext {
    /// Builds the context for one generation run.
    ///
    /// `instances` is the count after strategy selection, which may differ
    /// from the configured one when the object is single-instance.
    #[must_use]
    pub fn new(
        object: &ObjectDefinition,
        config: &GenerationConfig,
        instances: InstanceCount,
        timestamp: NaiveDateTime,
    ) -> Self {
        let counts = config.resource_instances.resolve(object);
        let names = unique_names(object);
        let resources: Vec<ResourceView> = object
            .resources()
            .iter()
            .map(|res| {
                let (upper, snake) = names
                    .get(&res.id())
                    .cloned()
                    .unwrap_or_else(|| (res.name_upper(), res.name_snake()));
                ResourceView::new(
                    res,
                    upper,
                    snake,
                    &counts,
                    config.dynamic_resource_instances,
                )
            })
            .collect();

        let version = if object.version().is_empty() {
            "1.0".to_string()
        } else {
            object.version().to_string()
        };

        let obj = ObjectView {
            id: object.id(),
            name: comment_text(object.name()),
            version,
            urn: comment_text(object.urn()),
            description_lines: comment_lines(object.description()),
            multiple_str: object.multiple_str(),
            mandatory_str: object.mandatory_str(),
            name_snake: object.name_snake(),
            name_upper: object.name_upper(),
            name_pascal: object.name_pascal(),
            resource_count: resources.len(),
            has_readable: object.has_any_readable_resources(),
            has_writable: object.has_any_writable_resources(),
            has_executable: object.has_any_executable_resources(),
            has_multiple_resources: object.has_any_multiple_resources(),
            needs_inst_reset: object.needs_instance_reset_handler(),
            has_storage: resources.iter().any(|r| !r.storage.is_empty()),
            resources,
        };

        let slots = instances.slots();
        let res_inst_handlers = config.dynamic_resource_instances && obj.has_multiple_resources;
        let has_handlers = obj.has_readable
            || obj.has_writable
            || obj.has_executable
            || obj.needs_inst_reset
            || instances.is_dynamic()
            || config.transactional
            || res_inst_handlers;
        Self {
            obj,
            transactional: config.transactional,
            dynamic_resources_instances: config.dynamic_resource_instances,
            dynamic_object_instances: instances.is_dynamic(),
            instances_number: slots,
            instance_indices: (0..slots).collect(),
            date_time: timestamp.format(DATE_TIME_FORMAT).to_string(),
            generator: format!("objgen {}", env!("CARGO_PKG_VERSION")),
            res_inst_handlers,
            has_handlers,
        }
    }
}

impl ResourceView {
    fn new(
        res: &ResourceDefinition,
        name_upper: String,
        name_snake: String,
        counts: &BTreeMap<u16, u16>,
        dynamic_instances: bool,
    ) -> Self {
        let instance_count = counts.get(&res.id()).copied().unwrap_or(0);
        let instance_indices = if res.is_multiple() && !dynamic_instances {
            (0..instance_count).collect()
        } else {
            Vec::new()
        };

        let slot = Slot {
            field: &name_snake,
            max: format!("{name_upper}_MAX_INSTANCES"),
            multiple: res.is_multiple(),
        };
        let value_type = res.value_type();

        Self {
            id: res.id(),
            name: comment_text(res.name()),
            kind_enum: res.kind_enum(),
            type_enum: res.type_enum(),
            value_type: value_type.as_str(),
            operations: res.access().as_str(),
            mandatory_str: res.mandatory_str(),
            multiple_str: res.multiple_str(),
            range_enumeration: or_not_applicable(res.range_enumeration()),
            units: or_not_applicable(res.units()),
            description_lines: comment_lines(res.description()),
            readable: res.is_readable(),
            writable: res.is_writable(),
            executable: res.is_executable(),
            multiple: res.is_multiple(),
            instance_count,
            instance_indices,
            value_field: res.value_field(),
            storage: slot.storage(value_type),
            value_arrays: slot.value_arrays(value_type),
            read_code: if res.is_readable() {
                slot.read_code(value_type)
            } else {
                Vec::new()
            },
            write_code: if res.is_writable() {
                slot.write_code(value_type)
            } else {
                Vec::new()
            },
            name_upper,
            name_snake,
        }
    }
}

/// Storage location of one resource inside the instance struct.
struct Slot<'a> {
    field: &'a str,
    max: String,
    multiple: bool,
}

impl Slot<'_> {
    /// C element type, `None` for types without storage.
    const fn c_type(value_type: ValueType) -> Option<&'static str> {
        match value_type {
            ValueType::String | ValueType::CoreLink => Some("char"),
            ValueType::Opaque => Some("uint8_t"),
            ValueType::Integer | ValueType::Time => Some("int64_t"),
            ValueType::UnsignedInteger => Some("uint64_t"),
            ValueType::Float => Some("double"),
            ValueType::Boolean => Some("bool"),
            ValueType::ObjectLink => Some("anj_objlnk_value_t"),
            ValueType::NotApplicable => None,
        }
    }

    const fn is_buffer(value_type: ValueType) -> bool {
        matches!(
            value_type,
            ValueType::String | ValueType::CoreLink | ValueType::Opaque
        )
    }

    fn dims(&self) -> String {
        if self.multiple {
            format!("[{}]", self.max)
        } else {
            String::new()
        }
    }

    fn storage(&self, value_type: ValueType) -> Vec<String> {
        let Some(c_type) = Self::c_type(value_type) else {
            return Vec::new();
        };
        let field = self.field;
        let dims = self.dims();
        let mut out = Vec::with_capacity(3);
        if self.multiple {
            out.push(format!("anj_riid_t {field}_insts{dims};"));
        }
        if Self::is_buffer(value_type) {
            out.push(format!("{c_type} {field}{dims}[VALUE_BUFFER_SIZE];"));
        } else {
            out.push(format!("{c_type} {field}{dims};"));
        }
        if value_type == ValueType::Opaque {
            out.push(format!("size_t {field}_len{dims};"));
        }
        out
    }

    fn value_arrays(&self, value_type: ValueType) -> Vec<String> {
        if !self.multiple || Self::c_type(value_type).is_none() {
            return Vec::new();
        }
        let mut out = vec![self.field.to_string()];
        if value_type == ValueType::Opaque {
            out.push(format!("{}_len", self.field));
        }
        out
    }

    fn lvalue(&self, suffix: &str) -> String {
        if self.multiple {
            format!("inst->{}{suffix}[idx]", self.field)
        } else {
            format!("inst->{}{suffix}", self.field)
        }
    }

    /// Lines opening a `case` body; multiple-instance resources look up
    /// the slot of `riid` first.
    fn prologue(&self) -> Vec<String> {
        if !self.multiple {
            return Vec::new();
        }
        vec![
            format!(
                "uint16_t idx = find_riid_index(inst->{}_insts, {}, riid);",
                self.field, self.max
            ),
            format!("if (idx == {}) {{", self.max),
            "    return ANJ_DM_ERR_NOT_FOUND;".to_string(),
            "}".to_string(),
        ]
    }

    fn read_code(&self, value_type: ValueType) -> Vec<String> {
        let mut out = self.prologue();
        let value = self.lvalue("");
        match value_type {
            ValueType::String | ValueType::CoreLink => {
                out.push(format!("out_value->bytes_or_string.data = {value};"));
            }
            ValueType::Opaque => {
                out.push(format!("out_value->bytes_or_string.data = {value};"));
                out.push(format!(
                    "out_value->bytes_or_string.chunk_length = {};",
                    self.lvalue("_len")
                ));
            }
            other => {
                if let Some(field) = other.value_field() {
                    out.push(format!("out_value->{field} = {value};"));
                }
            }
        }
        out.push("return 0;".to_string());
        out
    }

    fn write_code(&self, value_type: ValueType) -> Vec<String> {
        let mut out = self.prologue();
        let value = self.lvalue("");
        match value_type {
            ValueType::String | ValueType::CoreLink => {
                out.push(format!(
                    "return anj_dm_write_string_chunked(value, {value}, sizeof({value}), NULL);"
                ));
            }
            ValueType::Opaque => {
                out.push(format!(
                    "return anj_dm_write_bytes_chunked(value, {value}, sizeof({value}), &{}, NULL);",
                    self.lvalue("_len")
                ));
            }
            other => {
                if let Some(field) = other.value_field() {
                    out.push(format!("{value} = value->{field};"));
                }
                out.push("return 0;".to_string());
            }
        }
        out
    }
}

fn or_not_applicable(text: &str) -> String {
    if text.trim().is_empty() {
        "N/A".to_string()
    } else {
        comment_text(text)
    }
}

/// C names per resource ID, unique across every identifier the templates
/// build from them.
///
/// A name shared by several resources gets `_<rid>` appended, and so does
/// any name whose derived identifiers are already taken by an earlier
/// resource or by the fixed parts of the skeleton.
fn unique_names(object: &ObjectDefinition) -> HashMap<u16, (String, String)> {
    let resources = object.resources();
    let mut shared: HashMap<String, usize> = HashMap::new();
    for res in resources {
        *shared.entry(res.name_upper()).or_default() += 1;
    }

    let mut taken: HashSet<String> = [
        "iid".to_string(),
        format!("{}_MAX_INSTANCES", object.name_upper()),
        format!("{}_RESOURCES_COUNT", object.name_upper()),
    ]
    .into_iter()
    .collect();

    resources
        .iter()
        .map(|res| {
            let (mut upper, mut snake) = (res.name_upper(), res.name_snake());
            if shared.get(&upper).copied().unwrap_or(0) > 1 {
                upper = format!("{upper}_{}", res.id());
                snake = format!("{snake}_{}", res.id());
            }
            while derived_identifiers(&upper, &snake)
                .iter()
                .any(|ident| taken.contains(ident))
            {
                upper = format!("{upper}_{}", res.id());
                snake = format!("{snake}_{}", res.id());
            }
            taken.extend(derived_identifiers(&upper, &snake));
            (res.id(), (upper, snake))
        })
        .collect()
}

/// Identifiers the templates build from one resource's names.
fn derived_identifiers(upper: &str, snake: &str) -> [String; 6] {
    [
        format!("RID_{upper}"),
        format!("RID_{upper}_IDX"),
        format!("{upper}_MAX_INSTANCES"),
        snake.to_string(),
        format!("{snake}_insts"),
        format!("{snake}_len"),
    ]
}

/// Free text made safe for a one-line C comment.
fn comment_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "* /")
}

/// Description text wrapped for a C block comment.
fn comment_lines(text: &str) -> Vec<String> {
    wrap(&text.replace("*/", "* /"), DESCRIPTION_WIDTH)
}

/// Greedy word wrap; whitespace runs collapse to one space.
///
/// Words longer than `width` stay on a line of their own.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use objgen_model::{ObjectOptions, parse_document};

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn object(items: &str) -> ObjectDefinition {
        let xml = format!(
            "<LWM2M><Object><Name>Test Object</Name><ObjectID>42</ObjectID>\
             <MultipleInstances>Multiple</MultipleInstances><Mandatory>Optional</Mandatory>\
             <Resources>{items}</Resources></Object></LWM2M>"
        );
        let document = parse_document(&xml).unwrap();
        ObjectDefinition::from_document(&document, &ObjectOptions::default()).unwrap()
    }

    fn item(id: u16, name: &str, ops: &str, multiple: &str, ty: &str) -> String {
        format!(
            "<Item ID=\"{id}\"><Name>{name}</Name><Operations>{ops}</Operations>\
             <MultipleInstances>{multiple}</MultipleInstances><Mandatory>Optional</Mandatory>\
             <Type>{ty}</Type></Item>"
        )
    }

    #[test]
    fn test_wrap_greedy() {
        let text = "one two three four five six seven";
        assert_eq!(wrap(text, 9), ["one two", "three", "four five", "six seven"]);
        assert_eq!(wrap("", 70), Vec::<String>::new());
        assert_eq!(wrap("  a\n\tb  ", 70), ["a b"]);
    }

    #[test]
    fn test_comment_terminator_escaped() {
        assert_eq!(comment_lines("ends */ early"), ["ends * / early"]);
    }

    #[test]
    fn test_wrap_long_word() {
        assert_eq!(wrap("short averyveryverylongword x", 5), [
            "short",
            "averyveryverylongword",
            "x"
        ]);
    }

    #[test]
    fn test_context_flags() {
        let obj = object(&item(1, "On/Off", "RW", "Single", "Boolean"));
        let config = GenerationConfig::builder().transactional(true).build();
        let ctx = ObjectContext::new(&obj, &config, InstanceCount::Fixed(3), timestamp());

        assert!(ctx.transactional);
        assert!(!ctx.dynamic_object_instances);
        assert_eq!(ctx.instances_number, 3);
        assert_eq!(ctx.instance_indices, [0, 1, 2]);
        assert_eq!(ctx.date_time, "2025-01-02 03:04:05");
        assert_eq!(ctx.obj.version, "1.0");
        assert_eq!(ctx.obj.name_snake, "test_object");
        assert!(ctx.obj.has_readable && ctx.obj.has_writable);
        assert!(!ctx.obj.has_executable);
    }

    #[test]
    fn test_scalar_resource_code() {
        let obj = object(&item(1, "On/Off", "RW", "Single", "Boolean"));
        let ctx = ObjectContext::new(
            &obj,
            &GenerationConfig::default(),
            InstanceCount::Fixed(1),
            timestamp(),
        );
        let res = &ctx.obj.resources[0];

        assert_eq!(res.name_upper, "ON_OFF");
        assert_eq!(res.kind_enum, "ANJ_DM_RES_RW");
        assert_eq!(res.value_field, Some("bool_value"));
        assert_eq!(res.storage, ["bool on_off;"]);
        assert_eq!(res.read_code, [
            "out_value->bool_value = inst->on_off;",
            "return 0;"
        ]);
        assert_eq!(res.write_code, [
            "inst->on_off = value->bool_value;",
            "return 0;"
        ]);
        assert_eq!(res.units, "N/A");
    }

    #[test]
    fn test_multiple_resource_instances() {
        let obj = object(&item(7, "Samples", "R", "Multiple", "Integer"));
        let config = GenerationConfig::builder()
            .resource_instances(7, 3)
            .unwrap()
            .build();
        let ctx = ObjectContext::new(&obj, &config, InstanceCount::Fixed(1), timestamp());
        let res = &ctx.obj.resources[0];

        assert_eq!(res.kind_enum, "ANJ_DM_RES_RM");
        assert_eq!(res.instance_count, 3);
        assert_eq!(res.instance_indices, [0, 1, 2]);
        assert_eq!(res.storage, [
            "anj_riid_t samples_insts[SAMPLES_MAX_INSTANCES];",
            "int64_t samples[SAMPLES_MAX_INSTANCES];"
        ]);
        assert!(res.read_code[0].contains("find_riid_index"));
        assert!(res.write_code.is_empty());
    }

    #[test]
    fn test_default_resource_instances_and_dynamic() {
        let obj = object(&item(7, "Samples", "RW", "Multiple", "Opaque"));
        let config = GenerationConfig::builder()
            .dynamic_resource_instances(true)
            .build();
        let ctx = ObjectContext::new(&obj, &config, InstanceCount::Fixed(1), timestamp());
        let res = &ctx.obj.resources[0];

        assert_eq!(res.instance_count, 2);
        assert!(res.instance_indices.is_empty());
        assert_eq!(res.value_arrays, ["samples", "samples_len"]);
        assert!(
            res.write_code
                .last()
                .unwrap()
                .starts_with("return anj_dm_write_bytes_chunked(")
        );
    }

    #[test]
    fn test_executable_has_no_storage() {
        let obj = object(&item(4, "Reset", "E", "Single", ""));
        let ctx = ObjectContext::new(
            &obj,
            &GenerationConfig::default(),
            InstanceCount::Fixed(1),
            timestamp(),
        );
        let res = &ctx.obj.resources[0];
        assert!(res.storage.is_empty());
        assert!(res.read_code.is_empty());
        assert_eq!(res.type_enum, "ANJ_DATA_TYPE_NULL");
        assert!(!ctx.obj.has_storage);
    }

    #[test]
    fn test_colliding_names_get_suffix() {
        let items = format!(
            "{}{}",
            item(1, "Value", "R", "Single", "Float"),
            item(2, "value", "R", "Single", "Float")
        );
        let obj = object(&items);
        let ctx = ObjectContext::new(
            &obj,
            &GenerationConfig::default(),
            InstanceCount::Fixed(1),
            timestamp(),
        );
        let names: Vec<&str> = ctx
            .obj
            .resources
            .iter()
            .map(|r| r.name_upper.as_str())
            .collect();
        assert_eq!(names, ["VALUE_1", "VALUE_2"]);
    }

    fn resource_names(ctx: &ObjectContext) -> Vec<(&str, &str)> {
        ctx.obj
            .resources
            .iter()
            .map(|r| (r.name_upper.as_str(), r.name_snake.as_str()))
            .collect()
    }

    #[test]
    fn test_suffixed_name_does_not_clash_with_plain_name() {
        let items = format!(
            "{}{}{}",
            item(1, "Value", "R", "Single", "Float"),
            item(2, "value", "R", "Single", "Float"),
            item(3, "Value 1", "R", "Single", "Float")
        );
        let obj = object(&items);
        let ctx = ObjectContext::new(
            &obj,
            &GenerationConfig::default(),
            InstanceCount::Fixed(1),
            timestamp(),
        );
        assert_eq!(resource_names(&ctx), [
            ("VALUE_1", "value_1"),
            ("VALUE_2", "value_2"),
            ("VALUE_1_3", "value_1_3")
        ]);
    }

    #[test]
    fn test_names_avoid_skeleton_identifiers() {
        let items = format!(
            "{}{}{}{}{}",
            item(1, "IID", "R", "Single", "Integer"),
            item(2, "Samples", "R", "Multiple", "Opaque"),
            item(3, "Samples len", "R", "Single", "Integer"),
            item(4, "Samples IDX", "R", "Single", "Integer"),
            item(5, "Test Object", "R", "Multiple", "Integer")
        );
        let obj = object(&items);
        let ctx = ObjectContext::new(
            &obj,
            &GenerationConfig::default(),
            InstanceCount::Fixed(2),
            timestamp(),
        );
        assert_eq!(resource_names(&ctx), [
            ("IID_1", "iid_1"),
            ("SAMPLES", "samples"),
            ("SAMPLES_LEN_3", "samples_len_3"),
            ("SAMPLES_IDX_4", "samples_idx_4"),
            ("TEST_OBJECT_5", "test_object_5")
        ]);
        assert_eq!(ctx.obj.resources[0].storage, ["int64_t iid_1;"]);
    }

    #[test]
    fn test_comment_fields_escaped() {
        let xml = "<LWM2M><Object><Name>Odd */ Object</Name><ObjectID>42</ObjectID>\
                   <MultipleInstances>Single</MultipleInstances><Mandatory>Optional</Mandatory>\
                   <Resources><Item ID=\"1\"><Name>A */ B</Name><Operations>R</Operations>\
                   <MultipleInstances>Single</MultipleInstances><Mandatory>Optional</Mandatory>\
                   <Type>Integer</Type><RangeEnumeration>0..9 */</RangeEnumeration>\
                   <Units>*/s</Units></Item></Resources></Object></LWM2M>";
        let document = parse_document(xml).unwrap();
        let obj = ObjectDefinition::from_document(&document, &ObjectOptions::default()).unwrap();
        let ctx = ObjectContext::new(
            &obj,
            &GenerationConfig::default(),
            InstanceCount::Fixed(1),
            timestamp(),
        );
        let res = &ctx.obj.resources[0];

        assert_eq!(ctx.obj.name, "Odd * / Object");
        assert_eq!(res.name, "A * / B");
        assert_eq!(res.range_enumeration, "0..9 * /");
        assert_eq!(res.units, "* /s");
        assert_eq!(res.name_upper, "A_B");
    }

    #[test]
    fn test_dynamic_object_instances() {
        let obj = object("");
        let ctx = ObjectContext::new(
            &obj,
            &GenerationConfig::default(),
            InstanceCount::Dynamic { max: 4 },
            timestamp(),
        );
        assert!(ctx.dynamic_object_instances);
        assert_eq!(ctx.instances_number, 4);
        assert_eq!(ctx.obj.resource_count, 0);
        assert!(ctx.has_handlers);
        assert!(!ctx.res_inst_handlers);
    }
}
