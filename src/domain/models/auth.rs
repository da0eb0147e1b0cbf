use serde::{Deserialize, Serialize};

/// The `aud` claim. Providers send either one string or a list of them;
/// `Validation::set_audience` checks membership, this only has to decode it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Audience {
    fn from(aud: &str) -> Self {
        Audience::One(aud.to_string())
    }
}

impl From<String> for Audience {
    fn from(aud: String) -> Self {
        Audience::One(aud)
    }
}

impl From<Vec<String>> for Audience {
    fn from(auds: Vec<String>) -> Self {
        Audience::Many(auds)
    }
}

/// Access token claims as issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub aud: Audience,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_audience_decodes() {
        let claims: Claims = serde_json::from_value(json!({
            "sub": "u1", "aud": "authenticated", "exp": 1
        })).unwrap();
        assert_eq!(claims.aud, Audience::One("authenticated".into()));
    }

    #[test]
    fn test_audience_list_decodes() {
        let claims: Claims = serde_json::from_value(json!({
            "sub": "u1", "aud": ["account", "authenticated"], "exp": 1
        })).unwrap();
        assert_eq!(
            claims.aud,
            Audience::Many(vec!["account".into(), "authenticated".into()])
        );
        assert_eq!(CurrentUser::from(claims).id, "u1");
    }
}
