use std::collections::BTreeMap;
use std::fmt;

use image::ImageFormat;

pub const MAX_TWEET_CHARS: usize = 280;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_IMAGE: &str = "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";
pub const EMPTY_FILE: &str = "The submitted file is empty.";

/// A file part as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Raw submission of the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetForm {
    pub text: Option<String>,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedTweet {
    pub text: String,
    pub image: Option<ValidImage>,
}

/// Error messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl TweetForm {
    pub fn validate(self) -> Result<CleanedTweet, FormErrors> {
        let mut errors = FormErrors::default();

        let text = match self.text {
            Some(text) if !text.is_empty() => {
                let len = text.chars().count();
                if len > MAX_TWEET_CHARS {
                    errors.add(
                        "text",
                        format!(
                            "Ensure this value has at most {MAX_TWEET_CHARS} characters (it has {len})."
                        ),
                    );
                }
                text
            }
            _ => {
                errors.add("text", REQUIRED);
                String::new()
            }
        };

        let image = match self.image {
            None => None,
            Some(upload) if upload.filename.is_empty() && upload.bytes.is_empty() => None,
            Some(upload) if upload.bytes.is_empty() => {
                errors.add("image", EMPTY_FILE);
                None
            }
            Some(upload) => match detect_image(&upload.bytes) {
                Some(extension) => Some(ValidImage {
                    bytes: upload.bytes,
                    extension,
                }),
                None => {
                    errors.add("image", INVALID_IMAGE);
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(CleanedTweet { text, image })
        } else {
            Err(errors)
        }
    }
}

/// Returns the file extension for bytes that fully decode as a supported image.
fn detect_image(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;
    let extension = match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpg",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        _ => return None,
    };
    image::load_from_memory_with_format(bytes, format).ok()?;
    Some(extension)
}
