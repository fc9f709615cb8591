//! Generic CRUD screens shared by every entity family.
//!
//! A family plugs in by implementing [`AdminResource`]; [`resource_routes`]
//! then mounts the seven console routes for it:
//!
//! | Route              | Method | Outcome                                  |
//! |--------------------|--------|------------------------------------------|
//! | `/`                | GET    | list view, optional `?keyword=`          |
//! | `/new`             | GET    | empty create form                        |
//! | `/save`            | POST   | create, redirect to the list             |
//! | `/detail/{id}`     | GET    | detail view                              |
//! | `/edit/{id}`       | GET    | edit form                                |
//! | `/edit/{id}`       | POST   | update, redirect to the list             |
//! | `/delete/{id}`     | GET    | delete, redirect to the list             |
//!
//! A submission that fails a field check, a reference check or the natural-key
//! uniqueness check is answered with its form again, carrying an `errors` list;
//! storage is not written in that case.

use async_trait::async_trait;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::{debug, info};
use validator::Validate;

use crate::api::flash::Flash;
use crate::api::view::ModelAndView;
use crate::error::{AppResult, ValidationFieldError};
use crate::models::Entity;
use crate::services::EntityService;
use crate::state::AppState;
use crate::utils::validate::field_errors;

pub const CREATED_MESSAGE: &str = "登録に成功しました";
pub const UPDATED_MESSAGE: &str = "更新に成功しました";
pub const DELETED_MESSAGE: &str = "削除に成功しました";

/// Model key holding the field errors of a rejected form.
pub const ERRORS_KEY: &str = "errors";

/// An entity family exposed through the console screens.
///
/// The model key of a single record is [`Entity::ENTITY`]; view names are
/// derived from [`ROUTE`](AdminResource::ROUTE) and that key.
#[async_trait]
pub trait AdminResource: Entity + Default + Serialize {
    /// Form body bound from `application/x-www-form-urlencoded`.
    type Form: DeserializeOwned + Validate + Send + 'static;

    /// Route segment, also the view directory (`"categories"`).
    const ROUTE: &'static str;

    /// Model key of the list view (`"listCategories"`).
    const LIST_KEY: &'static str;

    /// Field error shown when the natural key is already taken.
    const DUPLICATE_MESSAGE: &'static str;

    fn service(state: &AppState) -> &EntityService<Self>;

    /// Turns a submitted form into an entity with the given id.
    ///
    /// Problems with individual fields are pushed onto `errors`; an `Err`
    /// return is reserved for failures that end the request.
    async fn bind(
        state: &AppState,
        form: Self::Form,
        id: Option<i64>,
        errors: &mut Vec<ValidationFieldError>,
    ) -> AppResult<Self>;

    /// Family-specific checks on the bound entity.
    fn check(_state: &AppState, _entity: &Self) -> Vec<ValidationFieldError> {
        Vec::new()
    }

    /// Extra model entries every form view of this family needs.
    async fn form_model(_state: &AppState) -> AppResult<Map<String, Value>> {
        Ok(Map::new())
    }
}

fn list_route<R: AdminResource>() -> String {
    format!("/{}", R::ROUTE)
}

fn view_name<R: AdminResource>(suffix: &str) -> String {
    format!("{}/{}_{}", R::ROUTE, R::ENTITY, suffix)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub keyword: Option<String>,
}

pub fn resource_routes<R: AdminResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>))
        .route("/new", get(new_form::<R>))
        .route("/save", post(save::<R>))
        .route("/detail/{id}", get(detail::<R>))
        .route("/edit/{id}", get(edit_form::<R>).post(update::<R>))
        .route("/delete/{id}", get(delete::<R>))
}

async fn list<R: AdminResource>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    flash: Flash,
) -> AppResult<ModelAndView> {
    // The flash message is only consumed once the page can be rendered.
    let records = R::service(&state)
        .list_all(query.keyword.as_deref())
        .await?;

    Ok(ModelAndView::new(format!("{0}/{0}", R::ROUTE))
        .with(R::LIST_KEY, &records)?
        .with("keyword", &query.keyword)?
        .with_flash(flash))
}

async fn new_form<R: AdminResource>(State(state): State<AppState>) -> AppResult<ModelAndView> {
    Ok(ModelAndView::new(view_name::<R>("form"))
        .with(R::ENTITY, &R::default())?
        .extend(R::form_model(&state).await?))
}

async fn detail<R: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ModelAndView> {
    let record = R::service(&state).get(id).await?;
    ModelAndView::new(view_name::<R>("detail")).with(R::ENTITY, &record)
}

async fn edit_form<R: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ModelAndView> {
    let record = R::service(&state).get(id).await?;

    Ok(ModelAndView::new(view_name::<R>("edit"))
        .with(R::ENTITY, &record)?
        .extend(R::form_model(&state).await?))
}

async fn save<R: AdminResource>(
    State(state): State<AppState>,
    Form(form): Form<R::Form>,
) -> AppResult<Response> {
    submit::<R>(&state, form, None).await
}

async fn update<R: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<R::Form>,
) -> AppResult<Response> {
    submit::<R>(&state, form, Some(id)).await
}

async fn delete<R: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    R::service(&state).delete(id).await?;
    info!(entity = R::ENTITY, id, "Deleted");

    Ok(state.flash.redirect(&list_route::<R>(), DELETED_MESSAGE))
}

/// Shared create/update flow. `id` is `None` for create.
async fn submit<R: AdminResource>(
    state: &AppState,
    form: R::Form,
    id: Option<i64>,
) -> AppResult<Response> {
    let mut errors = field_errors(&form);
    let entity = R::bind(state, form, id, &mut errors).await?;
    errors.extend(R::check(state, &entity));

    let service = R::service(state);
    if !service.check_unique(&entity).await? {
        errors.push(ValidationFieldError::new(R::KEY_FIELD, R::DUPLICATE_MESSAGE));
    }

    let (view, message) = if entity.is_new() {
        (view_name::<R>("form"), CREATED_MESSAGE)
    } else {
        (view_name::<R>("edit"), UPDATED_MESSAGE)
    };

    if !errors.is_empty() {
        debug!(entity = R::ENTITY, ?id, errors = errors.len(), "Form rejected");
        let page = ModelAndView::new(view)
            .with(R::ENTITY, &entity)?
            .with(ERRORS_KEY, &errors)?
            .extend(R::form_model(state).await?);
        return Ok(page.into_response());
    }

    let saved = service.save(entity).await?;
    info!(entity = R::ENTITY, id = ?saved.id(), "Saved");

    Ok(state.flash.redirect(&list_route::<R>(), message))
}
