use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    auth::{login::do_login, register::do_register, token::TokenKey},
    state::{AppState, DbPool},
    surveys::{
        create::create_survey,
        delete::delete_survey,
        list::{
            all_surveys, surveys_by_creator,
            surveys_by_creator_and_status_paginated,
            surveys_by_creator_paginated, surveys_by_status_paginated,
            surveys_filtered, surveys_paginated,
        },
        responses::{
            list_survey_responses, responses_by_respondent_paginated,
            submit_response, survey_response_count,
            survey_responses_paginated,
        },
        update::update_survey,
        view::survey_by_id,
    },
};

pub fn create_app(pool: DbPool) -> Router {
    let state = AppState {
        pool,
        token_key: TokenKey::from_env(),
    };

    Router::new()
        .route("/api/auth/register", post(do_register))
        .route("/api/auth/login", post(do_login))
        .route("/api/surveys/all", get(all_surveys))
        .route("/api/surveys/paginated", get(surveys_paginated))
        .route("/api/surveys/filtered", get(surveys_filtered))
        .route("/api/surveys/create", post(create_survey))
        .route("/api/surveys/creator/:email", get(surveys_by_creator))
        .route(
            "/api/surveys/creator/:email/paginated",
            get(surveys_by_creator_paginated),
        )
        .route(
            "/api/surveys/creator/:email/status/:status/paginated",
            get(surveys_by_creator_and_status_paginated),
        )
        .route(
            "/api/surveys/status/:status/paginated",
            get(surveys_by_status_paginated),
        )
        .route(
            "/api/surveys/responses/respondent/:email/paginated",
            get(responses_by_respondent_paginated),
        )
        .route(
            "/api/surveys/:id",
            get(survey_by_id).put(update_survey).delete(delete_survey),
        )
        .route("/api/surveys/:id/respond", post(submit_response))
        .route("/api/surveys/:id/responses", get(list_survey_responses))
        .route(
            "/api/surveys/:id/responses/paginated",
            get(survey_responses_paginated),
        )
        .route(
            "/api/surveys/:id/response-count",
            get(survey_response_count),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
