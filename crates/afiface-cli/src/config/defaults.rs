use super::OutputFormat;

pub const CONTACT_INPUT_PLACEHOLDER: &str = "{input}";

pub struct DefaultsConfig {
    pub output_format: OutputFormat,
    pub header: bool,
    pub contacts_program: String,
    pub contacts_args: Vec<String>,
    pub gather_all: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Json,
            header: true,
            contacts_program: "voronota-js-fast-iface-contacts".to_string(),
            contacts_args: vec![
                "--input".to_string(),
                CONTACT_INPUT_PLACEHOLDER.to_string(),
                "--expand-ids".to_string(),
                "--coarse-grained".to_string(),
            ],
            gather_all: true,
        }
    }
}
