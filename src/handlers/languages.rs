use axum::Json;

use crate::languages::{LanguageInfo, SUPPORTED_LANGUAGES};

pub async fn languages_handler() -> Json<&'static [LanguageInfo]> {
    Json(SUPPORTED_LANGUAGES)
}
