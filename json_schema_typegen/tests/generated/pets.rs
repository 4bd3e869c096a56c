//! Generated by json-schema-typegen. Do not edit manually.

#[derive(Debug, Clone, serde::Serialize)]
pub struct Cat {
    pub meow: bool,
}

impl<'de> serde::Deserialize<'de> for Cat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Plain {
            meow: bool,
        }
        let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;
        if raw.get("meow").is_none_or(serde_json::Value::is_null) {
            return Err(<D::Error as serde::de::Error>::custom("field meow in Cat: required"));
        }
        let plain: Plain = serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(Self {
            meow: plain.meow,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Dog {
    pub bark: bool,
}

impl<'de> serde::Deserialize<'de> for Dog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Plain {
            bark: bool,
        }
        let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;
        if raw.get("bark").is_none_or(serde_json::Value::is_null) {
            return Err(<D::Error as serde::de::Error>::custom("field bark in Dog: required"));
        }
        let plain: Plain = serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(Self {
            bark: plain.bark,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Fish {
    pub fins: u8,
}

impl<'de> serde::Deserialize<'de> for Fish {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Plain {
            fins: u8,
        }
        let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;
        if raw.get("fins").is_none_or(serde_json::Value::is_null) {
            return Err(<D::Error as serde::de::Error>::custom("field fins in Fish: required"));
        }
        let plain: Plain = serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?;
        if i128::from(plain.fins) < 1 {
            return Err(<D::Error as serde::de::Error>::custom("field fins in Fish: must be >= 1"));
        }
        if i128::from(plain.fins) > 8 {
            return Err(<D::Error as serde::de::Error>::custom("field fins in Fish: must be <= 8"));
        }
        Ok(Self {
            fins: plain.fins,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Pair {
    #[serde(flatten)]
    pub one_of_0: Option<Cat>,
    #[serde(flatten)]
    pub one_of_1: Option<Dog>,
}

impl<'de> serde::Deserialize<'de> for Pair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Plain {}
        let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;
        let mut one_of_errors: Vec<String> = Vec::new();
        let one_of_0 = match serde_json::from_value::<Cat>(serde_json::Value::Object(raw.clone())) {
            Ok(value) => Some(value),
            Err(error) => {
                one_of_errors.push(error.to_string());
                None
            }
        };
        let one_of_1 = match serde_json::from_value::<Dog>(serde_json::Value::Object(raw.clone())) {
            Ok(value) => Some(value),
            Err(error) => {
                one_of_errors.push(error.to_string());
                None
            }
        };
        let one_of_matches = [one_of_0.is_some(), one_of_1.is_some()].into_iter().filter(|matched| *matched).count();
        if one_of_matches == 0 {
            return Err(<D::Error as serde::de::Error>::custom(format!("no oneOf branch of Pair matched: {}", one_of_errors.join("; "))));
        }
        if one_of_matches > 1 {
            return Err(<D::Error as serde::de::Error>::custom("ambiguous oneOf in Pair: more than one branch matched"));
        }
        let _plain: Plain = serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(Self {
            one_of_0,
            one_of_1,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Pet {
    #[serde(flatten)]
    pub any_of_0: Option<Cat>,
    #[serde(flatten)]
    pub any_of_1: Option<Dog>,
    #[serde(flatten)]
    pub any_of_2: Option<Fish>,
}

impl<'de> serde::Deserialize<'de> for Pet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Plain {}
        let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;
        let mut any_of_errors: Vec<String> = Vec::new();
        let any_of_0 = match serde_json::from_value::<Cat>(serde_json::Value::Object(raw.clone())) {
            Ok(value) => Some(value),
            Err(error) => {
                any_of_errors.push(error.to_string());
                None
            }
        };
        let any_of_1 = match serde_json::from_value::<Dog>(serde_json::Value::Object(raw.clone())) {
            Ok(value) => Some(value),
            Err(error) => {
                any_of_errors.push(error.to_string());
                None
            }
        };
        let any_of_2 = match serde_json::from_value::<Fish>(serde_json::Value::Object(raw.clone())) {
            Ok(value) => Some(value),
            Err(error) => {
                any_of_errors.push(error.to_string());
                None
            }
        };
        if any_of_0.is_none() && any_of_1.is_none() && any_of_2.is_none() {
            return Err(<D::Error as serde::de::Error>::custom(format!("no anyOf branch of Pet matched: {}", any_of_errors.join("; "))));
        }
        let _plain: Plain = serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(Self {
            any_of_0,
            any_of_1,
            any_of_2,
        })
    }
}

/// A household of pets.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Pets {
    pub favorite: Pet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<PetsLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<PetsLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<PetsMark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Pets>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<Pair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl<'de> serde::Deserialize<'de> for Pets {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Plain {
            favorite: Pet,
            label: Option<PetsLabel>,
            level: Option<PetsLevel>,
            mark: Option<PetsMark>,
            next: Option<Box<Pets>>,
            note: Option<String>,
            pair: Option<Pair>,
            tags: Option<Vec<String>>,
        }
        let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;
        if raw.get("favorite").is_none_or(serde_json::Value::is_null) {
            return Err(<D::Error as serde::de::Error>::custom("field favorite in Pets: required"));
        }
        let plain: Plain = serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(Self {
            favorite: plain.favorite,
            label: plain.label,
            level: plain.level,
            mark: plain.mark,
            next: plain.next,
            note: plain.note,
            pair: plain.pair,
            tags: plain.tags,
        })
    }
}

pub type PetsLabel = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PetsLevel(pub i64);

impl PetsLevel {
    pub const VALUES: &[i64] = &[1, 2, 3];
}

impl serde::Serialize for PetsLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for PetsLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: i64 = serde::Deserialize::deserialize(deserializer)?;
        if Self::VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(<D::Error as serde::de::Error>::custom(format!("invalid value (expected one of {:?}): {value:?}", Self::VALUES)))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PetsMark(pub serde_json::Value);

impl PetsMark {
    // Accepted literals.
    #[must_use]
    pub fn values() -> Vec<serde_json::Value> {
        vec![serde_json::json!("x"), serde_json::json!(1), serde_json::json!(null)]
    }
}

impl serde::Serialize for PetsMark {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for PetsMark {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: serde_json::Value = serde::Deserialize::deserialize(deserializer)?;
        if Self::values().contains(&value) {
            Ok(Self(value))
        } else {
            Err(<D::Error as serde::de::Error>::custom(format!("invalid value (expected one of {:?}): {value:?}", serde_json::Value::Array(Self::values()))))
        }
    }
}

