use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use chirp_core::{CreateTweetError, FormErrors};
use tracing::warn;

use super::{
    error::AppError,
    flash,
    form::read_tweet_form,
    state::AppState,
    views::{self, POSTED},
};

pub async fn list_tweets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let tweets = state
        .service
        .list_tweets()
        .await
        .map_err(|err| AppError::store(err, state.debug))?;

    let message = state.flash.read(&headers);
    let mut response = Html(views::tweet_list(&tweets, message.as_deref())).into_response();
    if flash::is_present(&headers) {
        response
            .headers_mut()
            .insert(SET_COOKIE, flash::clear_cookie());
    }
    Ok(response)
}

pub async fn create_form() -> Html<String> {
    Html(views::create_form("", &FormErrors::default()))
}

pub async fn create_tweet(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let form = read_tweet_form(request).await?;
    let submitted = form.text.clone().unwrap_or_default();

    match state.service.create_tweet(form).await {
        Ok(_) => Ok((
            [(SET_COOKIE, state.flash.set_cookie(POSTED))],
            Redirect::to("/"),
        )
            .into_response()),
        Err(CreateTweetError::Invalid(errors)) => {
            Ok(Html(views::create_form(&submitted, &errors)).into_response())
        }
        Err(CreateTweetError::Store(err)) => Err(AppError::store(err, state.debug)),
    }
}

pub async fn healthz(State(state): State<Arc<AppState>>) -> Response {
    match state.service.store().ping().await {
        Ok(()) => (StatusCode::OK, "ok").into_response(),
        Err(err) => {
            warn!(error = %err, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response()
        }
    }
}
