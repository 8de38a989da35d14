//! Todo page handlers - day-scoped listing, creation, and deletion.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use daylist_core::day::DayWindow;
use daylist_core::domain::TodoPage;
use daylist_core::validation::validate_page_name;
use daylist_shared::dto::{
    CreatePageForm, DeletePageForm, PageNameError, PageTodos, TodoItem, TodoPageList,
    TodoPageListItem,
};

use crate::handlers::{parse_date, redirect};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/todos/{date}
///
/// The caller's todo pages created on that day, most recently updated first.
pub async fn list_pages(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let date = parse_date(&path.into_inner())?;
    let window = DayWindow::for_date(date);

    let pages = state.pages.list_for_day(identity.user_id, window).await?;

    let todo_page_list_items = pages
        .into_iter()
        .map(|p| TodoPageListItem {
            id: p.id,
            title: p.title,
        })
        .collect();

    Ok(HttpResponse::Ok().json(TodoPageList {
        todo_page_list_items,
    }))
}

/// POST /api/todos/{date}
///
/// Delete the page named in the form, then send the client back to the day
/// view. Deleting a page that is missing or belongs to someone else affects
/// nothing and still redirects.
pub async fn delete_page(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    form: web::Form<DeletePageForm>,
) -> AppResult<HttpResponse> {
    let date = parse_date(&path.into_inner())?;

    let affected = state
        .pages
        .delete_owned(form.id, identity.user_id)
        .await?;
    tracing::debug!(page_id = %form.id, affected, "Deleted todo page");

    Ok(redirect(format!("/{}", date.format("%Y-%m-%d"))))
}

/// POST /api/todos/{date}/new
///
/// Create a page for that day and send the client to it.
pub async fn create_page(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    form: web::Form<CreatePageForm>,
) -> AppResult<HttpResponse> {
    let date = parse_date(&path.into_inner())?;
    let window = DayWindow::for_date(date);
    let form = form.into_inner();

    if let Err(e) = validate_page_name(&form.title) {
        return Ok(HttpResponse::BadRequest().json(PageNameError {
            todo_page_name_error: e.to_string(),
        }));
    }

    let page = state
        .pages
        .create(TodoPage::new(identity.user_id, form.title, window.start))
        .await?;

    Ok(redirect(format!(
        "/{}/{}",
        date.format("%Y-%m-%d"),
        page.id
    )))
}

/// GET /api/todos/{date}/{page_id}
///
/// A page's todos plus its title. 404 unless the page exists, belongs to the
/// caller, and was created on that day.
pub async fn get_page(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, Uuid)>,
) -> AppResult<HttpResponse> {
    let (raw_date, page_id) = path.into_inner();
    let date = parse_date(&raw_date)?;
    let window = DayWindow::for_date(date);

    let page = state
        .pages
        .find_owned(page_id, identity.user_id, Some(window))
        .await?
        .ok_or_else(|| AppError::NotFound("Todo page not found".to_string()))?;

    let todos = state
        .todos
        .list_for_page(page.id)
        .await?
        .into_iter()
        .map(|t| TodoItem {
            id: t.id,
            content: t.content,
            completed: t.completed,
        })
        .collect();

    Ok(HttpResponse::Ok().json(PageTodos {
        todos,
        todo_page_name: page.title,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::header, test, web};

    use daylist_core::day::DayWindow;
    use daylist_core::domain::TodoPage;
    use daylist_core::ports::{TodoPageRepository, TodoRepository};
    use daylist_shared::dto::{PageNameError, PageTodos, TodoPageList};

    use crate::handlers;
    use crate::test_support::TestServices;

    #[actix_web::test]
    async fn creating_a_page_redirects_to_it() {
        let services = TestServices::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services.state.clone()))
                .app_data(web::Data::new(services.tokens.clone()))
                .app_data(web::Data::new(services.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await;
        let (_, bearer) = services.seed_user("sean@test.com").await;

        let req = test::TestRequest::post()
            .uri("/api/todos/2023-01-01/new")
            .insert_header(("Authorization", bearer))
            .set_form([("title", "Valid title")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 302);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(
            location.starts_with("/2023-01-01/"),
            "unexpected location {location}"
        );
    }

    #[actix_web::test]
    async fn creating_a_page_with_an_empty_title_is_rejected() {
        let services = TestServices::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services.state.clone()))
                .app_data(web::Data::new(services.tokens.clone()))
                .app_data(web::Data::new(services.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await;
        let (_, bearer) = services.seed_user("sean@test.com").await;

        let req = test::TestRequest::post()
            .uri("/api/todos/2023-01-01/new")
            .insert_header(("Authorization", bearer))
            .set_form([("title", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: PageNameError = test::read_body_json(resp).await;
        assert_eq!(
            body.todo_page_name_error,
            "Page name must be between 1 and 30 characters"
        );
    }

    #[actix_web::test]
    async fn listing_is_scoped_to_the_day_in_the_url() {
        let services = TestServices::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services.state.clone()))
                .app_data(web::Data::new(services.tokens.clone()))
                .app_data(web::Data::new(services.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await;
        let (user, bearer) = services.seed_user("sean@test.com").await;

        let day = DayWindow::for_date("2023-01-01".parse().unwrap());
        let next_day = DayWindow::for_date("2023-01-02".parse().unwrap());
        services
            .state
            .pages
            .create(TodoPage::new(user.id, "today".to_string(), day.start))
            .await
            .unwrap();
        services
            .state
            .pages
            .create(TodoPage::new(user.id, "tomorrow".to_string(), next_day.start))
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri("/api/todos/2023-01-01")
            .insert_header(("Authorization", bearer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: TodoPageList = test::read_body_json(resp).await;
        assert_eq!(body.todo_page_list_items.len(), 1);
        assert_eq!(body.todo_page_list_items[0].title, "today");
    }

    #[actix_web::test]
    async fn another_users_page_is_not_found() {
        let services = TestServices::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services.state.clone()))
                .app_data(web::Data::new(services.tokens.clone()))
                .app_data(web::Data::new(services.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await;
        let (owner, _) = services.seed_user("owner@test.com").await;
        let (_, intruder_bearer) = services.seed_user("intruder@test.com").await;

        let day = DayWindow::for_date("2023-01-01".parse().unwrap());
        let page = services
            .state
            .pages
            .create(TodoPage::new(owner.id, "private".to_string(), day.start))
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/todos/2023-01-01/{}", page.id))
            .insert_header(("Authorization", intruder_bearer))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn deleting_another_users_page_redirects_without_deleting() {
        let services = TestServices::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services.state.clone()))
                .app_data(web::Data::new(services.tokens.clone()))
                .app_data(web::Data::new(services.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await;
        let (owner, _) = services.seed_user("owner@test.com").await;
        let (_, intruder_bearer) = services.seed_user("intruder@test.com").await;

        let day = DayWindow::for_date("2023-01-01".parse().unwrap());
        let page = services
            .state
            .pages
            .create(TodoPage::new(owner.id, "private".to_string(), day.start))
            .await
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/todos/2023-01-01")
            .insert_header(("Authorization", intruder_bearer))
            .set_form([("id", page.id.to_string())])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 302);

        // still there for its owner
        assert!(
            services
                .state
                .pages
                .find_owned(page.id, owner.id, None)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[actix_web::test]
    async fn page_details_include_title_and_todos() {
        let services = TestServices::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services.state.clone()))
                .app_data(web::Data::new(services.tokens.clone()))
                .app_data(web::Data::new(services.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await;
        let (user, bearer) = services.seed_user("sean@test.com").await;

        let day = DayWindow::for_date("2023-01-01".parse().unwrap());
        let page = services
            .state
            .pages
            .create(TodoPage::new(user.id, "Groceries".to_string(), day.start))
            .await
            .unwrap();
        services
            .state
            .todos
            .create(daylist_core::domain::Todo::new(
                page.id,
                "Buy milk".to_string(),
            ))
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/todos/2023-01-01/{}", page.id))
            .insert_header(("Authorization", bearer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: PageTodos = test::read_body_json(resp).await;
        assert_eq!(body.todo_page_name, "Groceries");
        assert_eq!(body.todos.len(), 1);
        assert_eq!(body.todos[0].content, "Buy milk");
    }

    #[actix_web::test]
    async fn malformed_dates_are_bad_requests() {
        let services = TestServices::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(services.state.clone()))
                .app_data(web::Data::new(services.tokens.clone()))
                .app_data(web::Data::new(services.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await;
        let (_, bearer) = services.seed_user("sean@test.com").await;

        let req = test::TestRequest::get()
            .uri("/api/todos/not-a-date")
            .insert_header(("Authorization", bearer))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
