//! Generated by json-schema-typegen. Do not edit manually.

#[derive(Debug, Clone, serde::Serialize)]
pub struct Server {
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ServerMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl Server {
    /// # Errors
    ///
    /// Returns an error if `input` is not YAML or does not satisfy the schema.
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        Self::from_yaml_value(serde_yaml::from_str(input)?)
    }

    /// # Errors
    ///
    /// Returns an error if `value` does not satisfy the schema.
    pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error> {
        #[derive(serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Plain {
            host: String,
            mode: Option<ServerMode>,
            port: Option<u16>,
        }
        let raw: serde_yaml::Mapping = serde_yaml::from_value(value)?;
        if raw.get("host").is_none_or(serde_yaml::Value::is_null) {
            return Err(<serde_yaml::Error as serde::de::Error>::custom("field host in Server: required"));
        }
        let plain: Plain = serde_yaml::from_value(serde_yaml::Value::Mapping(raw))?;
        if plain.host.chars().count() < 1 {
            return Err(<serde_yaml::Error as serde::de::Error>::custom("field host in Server: length must be >= 1"));
        }
        if plain.port.as_ref().is_some_and(|value| i128::from(*value) < 1) {
            return Err(<serde_yaml::Error as serde::de::Error>::custom("field port in Server: must be >= 1"));
        }
        if plain.port.as_ref().is_some_and(|value| i128::from(*value) > 65535) {
            return Err(<serde_yaml::Error as serde::de::Error>::custom("field port in Server: must be <= 65535"));
        }
        Ok(Self {
            host: plain.host,
            mode: plain.mode,
            port: plain.port,
        })
    }

    /// # Errors
    ///
    /// Returns an error if a field cannot be represented in YAML.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl<'de> serde::Deserialize<'de> for Server {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: serde_yaml::Value = serde::Deserialize::deserialize(deserializer)?;
        Self::from_yaml_value(value).map_err(<D::Error as serde::de::Error>::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerMode {
    Fast,
    Safe,
}

impl ServerMode {
    pub const VALUES: &[&str] = &["fast", "safe"];
    pub const ALL: &[Self] = &[Self::Fast, Self::Safe];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Safe => "safe",
        }
    }
}

impl ServerMode {
    /// # Errors
    ///
    /// Returns an error if `input` is not YAML or does not satisfy the schema.
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        Self::from_yaml_value(serde_yaml::from_str(input)?)
    }

    /// # Errors
    ///
    /// Returns an error if `value` does not satisfy the schema.
    pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error> {
        let value: String = serde_yaml::from_value(value)?;
        match Self::VALUES.iter().position(|candidate| *candidate == value) {
            Some(index) => Ok(Self::ALL[index]),
            None => Err(<serde_yaml::Error as serde::de::Error>::custom(format!("invalid value (expected one of {:?}): {value:?}", Self::VALUES))),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the value cannot be represented in YAML.
    pub fn to_yaml_value(self) -> Result<serde_yaml::Value, serde_yaml::Error> {
        serde_yaml::to_value(self.as_str())
    }
}

impl serde::Serialize for ServerMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(self.as_str(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for ServerMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: serde_yaml::Value = serde::Deserialize::deserialize(deserializer)?;
        Self::from_yaml_value(value).map_err(<D::Error as serde::de::Error>::custom)
    }
}

