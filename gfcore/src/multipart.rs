//! Minimal multipart/form-data encoding for the image upload side-channel,
//! which is the one endpoint outside the JSON API convention.

use rand::Rng;

/// A multipart/form-data request body under construction.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let boundary = format!(
            "----giftflow{:016x}{:016x}",
            rng.random::<u64>(),
            rng.random::<u64>()
        );
        Self {
            boundary,
            body: Vec::new(),
        }
    }

    /// Appends a file part. The filename is sanitized of quotes and CR/LF so
    /// it cannot break out of the part header.
    pub fn add_file(&mut self, name: &str, filename: &str, data: &[u8]) -> &mut Self {
        let filename: String = filename
            .chars()
            .filter(|c| !matches!(c, '"' | '\r' | '\n'))
            .collect();
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// The value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Closes the form and returns the finished body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}
