use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::{
  adapters::http::errors::ApiError,
  application::tracking::{
    CreateClientCommand, CreateClientUseCase, CreateProjectCommand, CreateProjectUseCase,
    CreateTodoCommand, CreateTodoUseCase, ListCatalogUseCase,
  },
};

/// List clients ordered by name
/// GET /api/v1/clients
pub async fn list_clients_handler(
  use_case: web::Data<Arc<ListCatalogUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let clients = use_case.clients().await?;
  Ok(HttpResponse::Ok().json(clients))
}

/// Create client
/// POST /api/v1/clients
/// Body: { "name": "...", "currency": "EUR", "defaultRate": "50", ... }
pub async fn create_client_handler(
  request: web::Json<CreateClientCommand>,
  use_case: web::Data<Arc<CreateClientUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let client = use_case.execute(request.into_inner()).await?;
  Ok(HttpResponse::Created().json(client))
}

/// List projects ordered by name
/// GET /api/v1/projects
pub async fn list_projects_handler(
  use_case: web::Data<Arc<ListCatalogUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let projects = use_case.projects().await?;
  Ok(HttpResponse::Ok().json(projects))
}

/// Create project for an existing client
/// POST /api/v1/projects
/// Body: { "clientId": "...", "name": "...", "rateOverride": "75" }
pub async fn create_project_handler(
  request: web::Json<CreateProjectCommand>,
  use_case: web::Data<Arc<CreateProjectUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let project = use_case.execute(request.into_inner()).await?;
  Ok(HttpResponse::Created().json(project))
}

/// List to-dos ordered by title
/// GET /api/v1/todos
pub async fn list_todos_handler(
  use_case: web::Data<Arc<ListCatalogUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let todos = use_case.todos().await?;
  Ok(HttpResponse::Ok().json(todos))
}

/// Create to-do under an existing project
/// POST /api/v1/todos
/// Body: { "projectId": "...", "title": "...", "estimateMinutes": 90 }
pub async fn create_todo_handler(
  request: web::Json<CreateTodoCommand>,
  use_case: web::Data<Arc<CreateTodoUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let todo = use_case.execute(request.into_inner()).await?;
  Ok(HttpResponse::Created().json(todo))
}
