use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use chirp_core::{TweetForm, Upload};
use serde::Deserialize;

use super::error::AppError;

#[derive(Debug, Deserialize)]
struct TextOnly {
    text: Option<String>,
}

/// Reads the create form from either a multipart or a urlencoded body.
pub async fn read_tweet_form(request: Request) -> Result<TweetForm, AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if !is_multipart {
        let Form(fields) = Form::<TextOnly>::from_request(request, &()).await?;
        return Ok(TweetForm {
            text: fields.text,
            image: None,
        });
    }

    let mut multipart = Multipart::from_request(request, &()).await?;
    let mut form = TweetForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("text") => form.text = Some(field.text().await?),
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                form.image = Some(Upload { filename, bytes });
            }
            _ => {}
        }
    }
    Ok(form)
}
