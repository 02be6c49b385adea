pub mod client;
pub mod domains;
pub mod form;
pub mod report;
pub mod response;
pub mod tui;

pub use client::{PercolateClient, PercolateClientBuilder, PercolateError};
pub use form::{FormState, InputMode};
pub use response::TaggingResponse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builder_accessible_from_crate_root() {
        let client = PercolateClientBuilder::new()
            .base_url("http://localhost:8080")
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn types_accessible_from_crate_root() {
        let mut form = FormState::new();
        assert_eq!(form.mode(), InputMode::Text);
        form.select_mode(InputMode::Url);
        assert_eq!(form.mode(), InputMode::Url);

        let response: TaggingResponse =
            serde_json::from_str(r#"{"countries": {"kenya": 1.0}}"#)
                .expect("response should deserialize");
        assert_eq!(response.len(), 1);
    }
}
