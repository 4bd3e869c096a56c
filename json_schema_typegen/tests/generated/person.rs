//! Generated by json-schema-typegen. Do not edit manually.

/// A person known to the address book.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    pub name: String,
    pub nickname: Option<String>,
    pub role: PersonRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl<'de> serde::Deserialize<'de> for Person {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Plain {
            age: Option<u8>,
            email: Option<String>,
            name: String,
            nickname: Option<String>,
            role: Option<PersonRole>,
            tags: Option<Vec<String>>,
        }
        let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;
        if raw.get("name").is_none_or(serde_json::Value::is_null) {
            return Err(<D::Error as serde::de::Error>::custom("field name in Person: required"));
        }
        if !raw.contains_key("nickname") {
            return Err(<D::Error as serde::de::Error>::custom("field nickname in Person: required"));
        }
        let mut plain: Plain = serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?;
        if plain.age.as_ref().is_some_and(|value| i128::from(*value) < 0) {
            return Err(<D::Error as serde::de::Error>::custom("field age in Person: must be >= 0"));
        }
        if plain.age.as_ref().is_some_and(|value| i128::from(*value) > 150) {
            return Err(<D::Error as serde::de::Error>::custom("field age in Person: must be <= 150"));
        }
        if let Some(value) = &plain.email {
            let pattern = regress::Regex::new(r"^[^@]+@[^@]+$").map_err(<D::Error as serde::de::Error>::custom)?;
            if pattern.find(value.as_str()).is_none() {
                return Err(<D::Error as serde::de::Error>::custom("field email in Person: must match pattern ^[^@]+@[^@]+$"));
            }
        }
        if plain.name.chars().count() < 1 {
            return Err(<D::Error as serde::de::Error>::custom("field name in Person: length must be >= 1"));
        }
        if plain.name.chars().count() > 64 {
            return Err(<D::Error as serde::de::Error>::custom("field name in Person: length must be <= 64"));
        }
        if plain.role.is_none() {
            plain.role = Some(PersonRole::Member);
        }
        if plain.tags.as_ref().is_some_and(|value| value.len() > 3) {
            return Err(<D::Error as serde::de::Error>::custom("field tags in Person: length must be <= 3"));
        }
        Ok(Self {
            age: plain.age,
            email: plain.email,
            name: plain.name,
            nickname: plain.nickname,
            role: plain.role.ok_or_else(|| <D::Error as serde::de::Error>::custom("field role in Person: default missing"))?,
            tags: plain.tags,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonRole {
    Admin,
    Member,
    Guest,
}

impl PersonRole {
    pub const VALUES: &[&str] = &["admin", "member", "guest"];
    pub const ALL: &[Self] = &[Self::Admin, Self::Member, Self::Guest];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Guest => "guest",
        }
    }
}

impl serde::Serialize for PersonRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(self.as_str(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for PersonRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: String = serde::Deserialize::deserialize(deserializer)?;
        match Self::VALUES.iter().position(|candidate| *candidate == value) {
            Some(index) => Ok(Self::ALL[index]),
            None => Err(<D::Error as serde::de::Error>::custom(format!("invalid value (expected one of {:?}): {value:?}", Self::VALUES))),
        }
    }
}

