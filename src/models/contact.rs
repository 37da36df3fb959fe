use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Please enter your name".to_string());
        }
        if !is_plausible_email(self.email.trim()) {
            return Err("Please enter a valid email address".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("Please enter a message".to_string());
        }
        Ok(())
    }
}

fn is_plausible_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
