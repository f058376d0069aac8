// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed setting definitions.
//!
//! A setting record is discriminated by its `kind` field. Parsing reads
//! `kind` (defaulting to `string` when absent) and hands the remaining fields
//! to the matching variant struct, which rejects unknown fields and coerces
//! `value` to the kind's type. Everywhere else, settings are read through the
//! [`Setting`] trait so callers never need to know the concrete variant.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use plugdex_core::PlugdexError;
use schemars::{JsonSchema, Schema, SchemaGenerator};
use secrecy::{ExposeSecret, SecretString};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Every accepted value of a setting's `kind` field.
pub const SETTING_KINDS: &[&str] = &[
    "string",
    "email",
    "integer",
    "password",
    "date_iso8601",
    "boolean",
    "options",
    "object",
    "array",
    "oauth",
    "file",
];

/// Kind assumed when a record omits `kind`.
pub const DEFAULT_KIND: &str = "string";

/// Rendering used whenever a secret leaves the process.
const MASKED: &str = "**********";

/// Uniform read access to any setting, whatever its kind.
pub trait Setting {
    fn name(&self) -> &str;
    fn kind(&self) -> &'static str;
    fn label(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
    fn placeholder(&self) -> Option<&str>;
    /// Borrowed view of the declared value, if any.
    fn value(&self) -> Option<SettingValue<'_>>;
    /// Replace the declared value, coercing `raw` exactly as parsing does.
    ///
    /// `null` clears the value. On error the previous value is kept.
    fn set_value(&mut self, raw: Value) -> Result<(), PlugdexError>;
}

/// Borrowed, typed view of a setting's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue<'a> {
    /// `string`, `email`, `options`, and `oauth` values.
    Text(&'a str),
    Integer(i64),
    Secret(&'a SecretValue),
    Date(DateValue),
    Boolean(bool),
    Object(&'a BTreeMap<String, Value>),
    Array(&'a [Value]),
    Path(&'a Path),
}

impl SettingValue<'_> {
    /// JSON rendering of the value. Secrets are masked.
    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::Text(s) => Value::String((*s).to_string()),
            SettingValue::Integer(i) => Value::from(*i),
            SettingValue::Secret(_) => Value::String(MASKED.to_string()),
            SettingValue::Date(d) => Value::String(d.to_string()),
            SettingValue::Boolean(b) => Value::Bool(*b),
            SettingValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Map<String, Value>>(),
            ),
            SettingValue::Array(items) => Value::Array(items.to_vec()),
            SettingValue::Path(p) => Value::String(p.display().to_string()),
        }
    }
}

/// A password value. Never printed or serialized in clear text.
pub struct SecretValue(SecretString);

impl SecretValue {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(secret.into()))
    }

    /// The clear-text secret.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretValue {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl PartialEq for SecretValue {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SecretValue {}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue({MASKED})")
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(MASKED)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretValue::new)
    }
}

impl JsonSchema for SecretValue {
    fn schema_name() -> Cow<'static, str> {
        "SecretValue".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "password",
            "writeOnly": true
        })
    }
}

/// Value of a `date_iso8601` setting: a datetime (with or without offset)
/// or a plain date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DateValue {
    DateTime(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
    Date(NaiveDate),
}

impl DateValue {
    /// Calendar date, dropping any time of day.
    pub fn date(&self) -> NaiveDate {
        match self {
            DateValue::DateTime(dt) => dt.date_naive(),
            DateValue::Naive(dt) => dt.date(),
            DateValue::Date(d) => *d,
        }
    }

    pub fn year(&self) -> i32 {
        self.date().year()
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            DateValue::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            DateValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// One selectable choice of an `options` setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

/// OAuth provider reference of an `oauth` setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OAuth {
    pub provider: String,
}

trait AsSettingValue {
    fn as_setting_value(&self) -> SettingValue<'_>;
}

impl AsSettingValue for String {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Text(self)
    }
}

impl AsSettingValue for i64 {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Integer(*self)
    }
}

impl AsSettingValue for SecretValue {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Secret(self)
    }
}

impl AsSettingValue for DateValue {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Date(*self)
    }
}

impl AsSettingValue for bool {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Boolean(*self)
    }
}

impl AsSettingValue for BTreeMap<String, Value> {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Object(self)
    }
}

impl AsSettingValue for Vec<Value> {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Array(self)
    }
}

impl AsSettingValue for PathBuf {
    fn as_setting_value(&self) -> SettingValue<'_> {
        SettingValue::Path(self)
    }
}

/// Loosen a raw `value` toward the type its `kind` expects.
///
/// Numbers become text for text kinds, integral strings and floats become
/// integers, and the usual spellings of yes and no become booleans. Values
/// with no sensible conversion are returned unchanged, so the typed decode
/// reports them.
pub fn coerce_value(kind: &str, value: Value) -> Value {
    match (kind, value) {
        ("string" | "email" | "options" | "oauth" | "password", Value::Number(n)) => {
            Value::String(n.to_string())
        }
        ("integer", value) => coerce_integer(value),
        ("boolean", value) => coerce_boolean(value),
        (_, value) => value,
    }
}

fn coerce_integer(value: Value) -> Value {
    let coerced = match &value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) if !n.is_i64() => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64),
        _ => None,
    };
    coerced.map(Value::from).unwrap_or(value)
}

fn coerce_boolean(value: Value) -> Value {
    let coerced = match &value {
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "on" | "t" | "true" | "y" | "yes" => Some(true),
            "0" | "off" | "f" | "false" | "n" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };
    coerced.map(Value::Bool).unwrap_or(value)
}

/// Declares one setting variant struct: the shared metadata fields, a typed
/// `value`, optional kind-specific fields, and its [`Setting`] impl.
macro_rules! setting_kind {
    (
        $(#[$attr:meta])*
        $ty:ident, $kind:literal, $value:ty
        $(; $( $(#[$field_attr:meta])* $field:ident: $field_ty:ty ),+ $(,)? )?
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
        #[serde(deny_unknown_fields)]
        pub struct $ty {
            /// Unique within the owning plugin's settings.
            pub name: String,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub value: Option<$value>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub label: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub docs: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub documentation: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub description: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub placeholder: Option<String>,
            /// Environment variable the value is read from.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub env: Option<String>,
            #[serde(default, skip_serializing_if = "Vec::is_empty")]
            pub env_aliases: Vec<String>,
            #[serde(default, skip_serializing_if = "Vec::is_empty")]
            pub aliases: Vec<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub value_processor: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub value_post_processor: Option<String>,
            $($( $(#[$field_attr])* pub $field: $field_ty, )+)?
        }

        impl $ty {
            pub const KIND: &'static str = $kind;
        }

        impl Setting for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn kind(&self) -> &'static str {
                $kind
            }

            fn label(&self) -> Option<&str> {
                self.label.as_deref()
            }

            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }

            fn placeholder(&self) -> Option<&str> {
                self.placeholder.as_deref()
            }

            fn value(&self) -> Option<SettingValue<'_>> {
                self.value.as_ref().map(AsSettingValue::as_setting_value)
            }

            fn set_value(&mut self, raw: Value) -> Result<(), PlugdexError> {
                let value: Option<$value> =
                    serde_json::from_value(coerce_value($kind, raw)).map_err(|e| {
                        PlugdexError::schema(
                            format!("setting `{}`", self.name),
                            format!("invalid {} value: {e}", $kind),
                        )
                    })?;
                self.value = value;
                Ok(())
            }
        }
    };
}

setting_kind! {
    /// Free-form text.
    StringSetting, "string", String;
    /// Protected settings may only be set in project files, never via env.
    #[serde(default)]
    protected: bool,
}

setting_kind! {
    EmailSetting, "email", String
}

setting_kind! {
    IntegerSetting, "integer", i64
}

setting_kind! {
    /// A secret. The value is masked in `Debug` and serialized output.
    PasswordSetting, "password", SecretValue
}

setting_kind! {
    /// An ISO 8601 date or datetime.
    DateSetting, "date_iso8601", DateValue
}

setting_kind! {
    BooleanSetting, "boolean", bool
}

setting_kind! {
    /// One value out of an enumerated set of choices.
    ChoiceSetting, "options", String;
    options: Vec<Choice>,
}

setting_kind! {
    ObjectSetting, "object", BTreeMap<String, Value>
}

setting_kind! {
    ArraySetting, "array", Vec<Value>
}

setting_kind! {
    /// Names the OAuth provider the value is obtained from.
    OAuthSetting, "oauth", String;
    oauth: OAuth,
}

setting_kind! {
    /// A filesystem path.
    FileSetting, "file", PathBuf
}

/// A setting definition of any kind.
///
/// On the wire this is a flat record whose `kind` field selects the variant.
/// Records without `kind` are `string` settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum SettingDefinition {
    #[serde(rename = "string")]
    String(StringSetting),
    #[serde(rename = "email")]
    Email(EmailSetting),
    #[serde(rename = "integer")]
    Integer(IntegerSetting),
    #[serde(rename = "password")]
    Password(PasswordSetting),
    #[serde(rename = "date_iso8601")]
    Date(DateSetting),
    #[serde(rename = "boolean")]
    Boolean(BooleanSetting),
    #[serde(rename = "options")]
    Options(ChoiceSetting),
    #[serde(rename = "object")]
    Object(ObjectSetting),
    #[serde(rename = "array")]
    Array(ArraySetting),
    #[serde(rename = "oauth")]
    OAuth(OAuthSetting),
    #[serde(rename = "file")]
    File(FileSetting),
}

impl SettingDefinition {
    /// Parse an untyped record into the variant selected by its `kind`.
    pub fn from_value(record: Value) -> Result<Self, PlugdexError> {
        serde_json::from_value(record).map_err(|e| PlugdexError::schema("setting", e.to_string()))
    }

    fn from_record(kind: &str, mut record: Map<String, Value>) -> Result<Self, String> {
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        if let Some(value) = record.remove("value") {
            record.insert("value".to_string(), coerce_value(kind, value));
        }
        let body = Value::Object(record);

        let parsed = match kind {
            "string" => serde_json::from_value(body).map(SettingDefinition::String),
            "email" => serde_json::from_value(body).map(SettingDefinition::Email),
            "integer" => serde_json::from_value(body).map(SettingDefinition::Integer),
            "password" => serde_json::from_value(body).map(SettingDefinition::Password),
            "date_iso8601" => serde_json::from_value(body).map(SettingDefinition::Date),
            "boolean" => serde_json::from_value(body).map(SettingDefinition::Boolean),
            "options" => serde_json::from_value(body).map(SettingDefinition::Options),
            "object" => serde_json::from_value(body).map(SettingDefinition::Object),
            "array" => serde_json::from_value(body).map(SettingDefinition::Array),
            "oauth" => serde_json::from_value(body).map(SettingDefinition::OAuth),
            "file" => serde_json::from_value(body).map(SettingDefinition::File),
            other => {
                return Err(format!(
                    "setting `{name}` has unknown kind `{other}`, expected one of: {}",
                    SETTING_KINDS.join(", ")
                ));
            }
        };

        parsed.map_err(|e| format!("setting `{name}` ({kind}): {e}"))
    }

    fn as_setting(&self) -> &dyn Setting {
        match self {
            SettingDefinition::String(s) => s,
            SettingDefinition::Email(s) => s,
            SettingDefinition::Integer(s) => s,
            SettingDefinition::Password(s) => s,
            SettingDefinition::Date(s) => s,
            SettingDefinition::Boolean(s) => s,
            SettingDefinition::Options(s) => s,
            SettingDefinition::Object(s) => s,
            SettingDefinition::Array(s) => s,
            SettingDefinition::OAuth(s) => s,
            SettingDefinition::File(s) => s,
        }
    }

    fn as_setting_mut(&mut self) -> &mut dyn Setting {
        match self {
            SettingDefinition::String(s) => s,
            SettingDefinition::Email(s) => s,
            SettingDefinition::Integer(s) => s,
            SettingDefinition::Password(s) => s,
            SettingDefinition::Date(s) => s,
            SettingDefinition::Boolean(s) => s,
            SettingDefinition::Options(s) => s,
            SettingDefinition::Object(s) => s,
            SettingDefinition::Array(s) => s,
            SettingDefinition::OAuth(s) => s,
            SettingDefinition::File(s) => s,
        }
    }
}

impl Setting for SettingDefinition {
    fn name(&self) -> &str {
        self.as_setting().name()
    }

    fn kind(&self) -> &'static str {
        self.as_setting().kind()
    }

    fn label(&self) -> Option<&str> {
        self.as_setting().label()
    }

    fn description(&self) -> Option<&str> {
        self.as_setting().description()
    }

    fn placeholder(&self) -> Option<&str> {
        self.as_setting().placeholder()
    }

    fn value(&self) -> Option<SettingValue<'_>> {
        self.as_setting().value()
    }

    fn set_value(&mut self, raw: Value) -> Result<(), PlugdexError> {
        self.as_setting_mut().set_value(raw)
    }
}

impl JsonSchema for SettingDefinition {
    fn schema_name() -> Cow<'static, str> {
        "SettingDefinition".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        let branches = vec![
            kind_branch::<StringSetting>(generator, StringSetting::KIND),
            kind_branch::<EmailSetting>(generator, EmailSetting::KIND),
            kind_branch::<IntegerSetting>(generator, IntegerSetting::KIND),
            kind_branch::<PasswordSetting>(generator, PasswordSetting::KIND),
            kind_branch::<DateSetting>(generator, DateSetting::KIND),
            kind_branch::<BooleanSetting>(generator, BooleanSetting::KIND),
            kind_branch::<ChoiceSetting>(generator, ChoiceSetting::KIND),
            kind_branch::<ObjectSetting>(generator, ObjectSetting::KIND),
            kind_branch::<ArraySetting>(generator, ArraySetting::KIND),
            kind_branch::<OAuthSetting>(generator, OAuthSetting::KIND),
            kind_branch::<FileSetting>(generator, FileSetting::KIND),
        ];
        schemars::json_schema!({ "oneOf": branches })
    }
}

/// Inline schema of one variant struct with its `kind` tag added. The tag is
/// required everywhere except on the default kind.
fn kind_branch<T: JsonSchema>(generator: &mut SchemaGenerator, kind: &str) -> Schema {
    let mut schema = T::json_schema(generator);
    if let Some(object) = schema.as_object_mut() {
        if let Some(Value::Object(properties)) = object.get_mut("properties") {
            properties.insert(
                "kind".to_string(),
                serde_json::json!({ "type": "string", "const": kind }),
            );
        }
        if kind != DEFAULT_KIND {
            match object.get_mut("required") {
                Some(Value::Array(required)) => required.push(Value::from("kind")),
                _ => {
                    object.insert("required".to_string(), serde_json::json!(["kind"]));
                }
            }
        }
    }
    schema
}

impl<'de> Deserialize<'de> for SettingDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut record = Map::<String, Value>::deserialize(deserializer)?;
        let kind = match record.remove("kind") {
            None => DEFAULT_KIND.to_string(),
            Some(Value::String(kind)) => kind,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "setting `kind` must be a string, found {other}"
                )));
            }
        };
        SettingDefinition::from_record(&kind, record).map_err(de::Error::custom)
    }
}
