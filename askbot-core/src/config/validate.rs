//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();
    let generator = &config.generator;

    if generator.model.trim().is_empty() {
        errors.push("generator.model must not be empty".to_string());
    }
    let api_base = generator.api_base.trim();
    if api_base.is_empty() {
        errors.push("generator.api_base must not be empty".to_string());
    } else if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
        errors.push("generator.api_base must be an http(s) URL".to_string());
    }
    if !(0.0..=2.0).contains(&generator.temperature) {
        errors.push("generator.temperature must be in [0.0, 2.0]".to_string());
    } else if generator.do_sample && generator.temperature <= 0.0 {
        errors.push("generator.temperature must be > 0 when do_sample is enabled".to_string());
    }
    if generator.max_length == 0 {
        errors.push("generator.max_length must be > 0".to_string());
    }
    if generator.request_timeout_secs == 0 {
        errors.push("generator.request_timeout_secs must be > 0".to_string());
    }

    for (i, question) in config.chat.demo_questions.iter().enumerate() {
        if question.trim().is_empty() {
            errors.push(format!("chat.demo_questions[{}] must not be blank", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
