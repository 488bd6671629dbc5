pub mod client;
pub mod extract;
pub mod image;
pub mod text;
pub mod types;

pub use image::GeminiImageClient;
pub use text::GeminiTextClient;

/// Adds a test-only `with_base_url` builder to a client type wrapping
/// [`client::GeminiHttpClient`] in an `http` field.
#[cfg(test)]
macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            pub fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}

#[cfg(test)]
pub(crate) use impl_with_gemini_base_url;
