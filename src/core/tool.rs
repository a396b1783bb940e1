use serde_json::{json, Map, Value as JsonValue};

/// Runtime type of a tool argument as advertised in its input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
}

impl FieldKind {
    fn as_schema_type(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Number(u32),
    Str(&'static str),
}

/// One entry of a tool's input schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<FieldDefault>,
    pub allowed: &'static [&'static str],
}

impl FieldSpec {
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            description,
            required: false,
            default: None,
            allowed: &[],
        }
    }

    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            description,
            required: false,
            default: None,
            allowed: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn default(mut self, value: FieldDefault) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    fn schema(&self) -> JsonValue {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.as_schema_type()));
        if !self.allowed.is_empty() {
            prop.insert("enum".into(), json!(self.allowed));
        }
        prop.insert("description".into(), json!(self.description));
        match self.default {
            Some(FieldDefault::Number(n)) => {
                prop.insert("default".into(), json!(n));
            }
            Some(FieldDefault::Str(s)) => {
                prop.insert("default".into(), json!(s));
            }
            None => {}
        }
        JsonValue::Object(prop)
    }
}

/// Static metadata for one invocable tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ToolDescriptor {
    pub fn required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    pub fn input_schema(&self) -> JsonValue {
        let properties: Map<String, JsonValue> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.schema()))
            .collect();
        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), JsonValue::Object(properties));
        let required = self.required();
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        JsonValue::Object(schema)
    }
}

/// Static metadata for one readable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub mime_type: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::string("text", "body").required(),
        FieldSpec::string("visibility", "who sees it")
            .one_of(&["PUBLIC", "CONNECTIONS"])
            .default(FieldDefault::Str("PUBLIC")),
        FieldSpec::number("count", "page size").default(FieldDefault::Number(10)),
    ];

    #[test]
    fn schema_lists_properties_and_required() {
        let t = ToolDescriptor {
            name: "demo",
            description: "demo tool",
            fields: FIELDS,
        };
        let s = t.input_schema();
        assert_eq!(s["type"], "object");
        assert_eq!(s["required"], json!(["text"]));
        assert_eq!(s["properties"]["text"]["type"], "string");
        assert_eq!(s["properties"]["visibility"]["enum"], json!(["PUBLIC", "CONNECTIONS"]));
        assert_eq!(s["properties"]["visibility"]["default"], "PUBLIC");
        assert_eq!(s["properties"]["count"]["type"], "number");
        assert_eq!(s["properties"]["count"]["default"], 10);
    }

    #[test]
    fn schema_without_required_fields_omits_key() {
        let t = ToolDescriptor {
            name: "empty",
            description: "no args",
            fields: &[],
        };
        let s = t.input_schema();
        assert!(s.get("required").is_none());
        assert!(s["properties"].as_object().unwrap().is_empty());
    }
}
