//! floorplan.rs
//!
//! HTTP rozhraní zasedacího pořádku - příkazy, které back-office UI
//! posílá při práci s plánem (drag-and-drop přesuny, zakládání a rušení
//! stolů, import hostů z rezervací, uložení).
//!
//! Všechny mutace běží synchronně nad pracovní kopií v paměti; síť se
//! používá jen pro hydrataci, import rezervací a závěrečné uložení.
//! Když uložení selže, lokální stav zůstává beze změny a obsluha může
//! akci prostě zopakovat.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::{
    floorplan::{DropTarget, FloorPlan, Reconciliation},
    middleware::AuthUser,
    models::{Guest, GuestCategory, Room},
    services::backend::BackendError,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events/{event_id}/floorplan", get(get_floor_plan))
        .route("/events/{event_id}/floorplan/reload", post(reload_floor_plan))
        .route(
            "/events/{event_id}/floorplan/reconciliation",
            get(get_reconciliation),
        )
        .route("/events/{event_id}/floorplan/import", post(import_reservations))
        .route("/events/{event_id}/floorplan/save", post(save_floor_plan))
        .route("/events/{event_id}/tables", post(create_table))
        .route(
            "/events/{event_id}/tables/{table_id}",
            put(update_table).delete(delete_table),
        )
        .route("/events/{event_id}/guests", post(create_guest))
        .route("/events/{event_id}/guests/move", patch(move_guest))
        .route("/events/{event_id}/guests/unseat", patch(unseat_guest))
        .route("/events/{event_id}/guests/{guest_id}", delete(delete_guest))
}

/* ---------- helpers ---------- */

#[derive(Serialize)]
pub struct ApiError {
    success: bool,
    message: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn to_api_error(status: StatusCode, message: &str) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            success: false,
            message: message.to_string(),
        }),
    )
}

fn backend_error(event_id: i64, e: BackendError) -> (StatusCode, Json<ApiError>) {
    match e {
        BackendError::EventNotFound(_) => {
            to_api_error(StatusCode::NOT_FOUND, "Událost nenalezena")
        }
        _ => {
            tracing::error!("Backend událostí selhal pro událost {}: {:?}", event_id, e);
            to_api_error(
                StatusCode::BAD_GATEWAY,
                "Backend událostí je momentálně nedostupný. Zkuste to prosím znovu.",
            )
        }
    }
}

fn session_missing() -> (StatusCode, Json<ApiError>) {
    to_api_error(StatusCode::NOT_FOUND, "Zasedací pořádek není načten")
}

// Líná hydratace: když pro událost neexistuje pracovní kopie, stáhne se
// dokument ze serveru a stav se nahradí vcelku
async fn ensure_session(state: &Arc<AppState>, event_id: i64) -> ApiResult<()> {
    if event_id <= 0 {
        return Err(to_api_error(
            StatusCode::BAD_REQUEST,
            "ID události musí být > 0",
        ));
    }
    if state.sessions.contains(event_id) {
        return Ok(());
    }

    let document = state
        .backend
        .fetch_event(event_id)
        .await
        .map_err(|e| backend_error(event_id, e))?;
    state.sessions.replace(FloorPlan::hydrate(document));
    tracing::info!("Zasedací pořádek události {} načten ze serveru", event_id);
    Ok(())
}

/* ---------- zobrazení plánu ---------- */

#[derive(Debug, Deserialize)]
struct FloorPlanQuery {
    // národnost pro filtr nezasazených; "all" nebo nic = bez filtru
    nationality: Option<String>,
}

#[derive(Debug, Serialize)]
struct TableView {
    id: i64,
    name: String,
    capacity: u32,
    // obsazenost se jen zobrazuje - překročení kapacity nic neblokuje
    occupied: usize,
    guests: Vec<Guest>,
}

#[derive(Debug, Serialize)]
struct RoomView {
    room: Room,
    tables: Vec<TableView>,
}

#[derive(Debug, Serialize)]
struct FloorPlanView {
    #[serde(rename = "eventId")]
    event_id: i64,
    date: NaiveDate,
    rooms: Vec<RoomView>,
    unassigned: Vec<Guest>,
    nationalities: Vec<String>,
}

async fn get_floor_plan(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    Query(params): Query<FloorPlanQuery>,
    _user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    ensure_session(&state, event_id).await?;

    let nationality = params
        .nationality
        .as_deref()
        .filter(|n| !n.is_empty() && *n != "all")
        .map(str::to_string);

    let view = state
        .sessions
        .read(event_id, |plan| {
            let rooms = Room::ALL
                .iter()
                .map(|&room| RoomView {
                    room,
                    tables: plan
                        .tables_in_room(room)
                        .map(|table| TableView {
                            id: table.id,
                            name: table.name.clone(),
                            capacity: table.capacity,
                            occupied: plan.seated_at(table.id).count(),
                            guests: plan.seated_at(table.id).cloned().collect(),
                        })
                        .collect(),
                })
                .collect();

            FloorPlanView {
                event_id: plan.event_id,
                date: plan.date,
                rooms,
                unassigned: plan
                    .unassigned_filtered(nationality.as_deref())
                    .into_iter()
                    .cloned()
                    .collect(),
                nationalities: plan.unassigned_nationalities(),
            }
        })
        .ok_or_else(session_missing)?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /api/events/{id}/floorplan/reload - vynucené znovunačtení ze serveru
async fn reload_floor_plan(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    _user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    if event_id <= 0 {
        return Err(to_api_error(
            StatusCode::BAD_REQUEST,
            "ID události musí být > 0",
        ));
    }

    let document = state
        .backend
        .fetch_event(event_id)
        .await
        .map_err(|e| backend_error(event_id, e))?;
    state.sessions.replace(FloorPlan::hydrate(document));

    Ok((
        StatusCode::OK,
        Json(json!({"success": true, "message": "Zasedací pořádek znovu načten ze serveru"})),
    ))
}

// GET /api/events/{id}/floorplan/reconciliation
async fn get_reconciliation(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    _user: AuthUser,
) -> ApiResult<(StatusCode, Json<Reconciliation>)> {
    ensure_session(&state, event_id).await?;

    let view = state
        .sessions
        .read(event_id, |plan| plan.reconciliation())
        .ok_or_else(session_missing)?;

    Ok((StatusCode::OK, Json(view)))
}

/* ---------- STOLY ---------- */

#[derive(Debug, Deserialize)]
struct CreateTableRequest {
    name: String,
    room: Room,
    capacity: u32,
}

#[derive(Debug, Serialize)]
struct CreateTableResponse {
    id: i64,
}

async fn create_table(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    _user: AuthUser,
    Json(req): Json<CreateTableRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.name.trim().is_empty() {
        return Err(to_api_error(
            StatusCode::BAD_REQUEST,
            "Název stolu nesmí být prázdný",
        ));
    }
    if req.capacity == 0 {
        return Err(to_api_error(
            StatusCode::BAD_REQUEST,
            "Kapacita stolu musí být > 0",
        ));
    }

    ensure_session(&state, event_id).await?;

    let id = state
        .sessions
        .write(event_id, |plan| {
            plan.create_table(req.name.clone(), req.room, req.capacity)
        })
        .ok_or_else(session_missing)?;

    Ok((StatusCode::CREATED, Json(CreateTableResponse { id })))
}

#[derive(Debug, Deserialize)]
struct UpdateTableRequest {
    name: String,
    room: Room,
    capacity: u32,
}

async fn update_table(
    State(state): State<Arc<AppState>>,
    Path((event_id, table_id)): Path<(i64, i64)>,
    _user: AuthUser,
    Json(req): Json<UpdateTableRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.name.trim().is_empty() {
        return Err(to_api_error(
            StatusCode::BAD_REQUEST,
            "Název stolu nesmí být prázdný",
        ));
    }
    if req.capacity == 0 {
        return Err(to_api_error(
            StatusCode::BAD_REQUEST,
            "Kapacita stolu musí být > 0",
        ));
    }

    ensure_session(&state, event_id).await?;

    let result = state
        .sessions
        .write(event_id, |plan| {
            plan.update_table(table_id, req.name.clone(), req.room, req.capacity)
        })
        .ok_or_else(session_missing)?;

    match result {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({"success": true, "message": "Stůl upraven"})),
        )),
        Err(_) => Err(to_api_error(StatusCode::NOT_FOUND, "Stůl nenalezen")),
    }
}

async fn delete_table(
    State(state): State<Arc<AppState>>,
    Path((event_id, table_id)): Path<(i64, i64)>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    ensure_session(&state, event_id).await?;

    let result = state
        .sessions
        .write(event_id, |plan| plan.delete_table(table_id))
        .ok_or_else(session_missing)?;

    match result {
        Ok(displaced) => {
            tracing::info!(
                "Stůl {} události {} smazán ({}), hostů vráceno mezi nezasazené: {}",
                table_id,
                event_id,
                user.email,
                displaced
            );
            Ok((
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "displaced": displaced,
                    "message": format!("Stůl smazán, hostů vráceno mezi nezasazené: {}", displaced)
                })),
            ))
        }
        Err(_) => Err(to_api_error(StatusCode::NOT_FOUND, "Stůl nenalezen")),
    }
}

/* ---------- HOSTÉ ---------- */

#[derive(Debug, Deserialize)]
struct CreateGuestRequest {
    name: String,
    category: GuestCategory,
    nationality: Option<String>,
    #[serde(default)]
    paid: bool,
}

#[derive(Debug, Serialize)]
struct CreateGuestResponse {
    id: i64,
}

async fn create_guest(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    _user: AuthUser,
    Json(req): Json<CreateGuestRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.name.trim().is_empty() {
        return Err(to_api_error(
            StatusCode::BAD_REQUEST,
            "Jméno hosta nesmí být prázdné",
        ));
    }

    ensure_session(&state, event_id).await?;

    let id = state
        .sessions
        .write(event_id, |plan| {
            plan.add_guest(
                req.name.clone(),
                req.category,
                req.nationality.clone(),
                req.paid,
            )
        })
        .ok_or_else(session_missing)?;

    Ok((StatusCode::CREATED, Json(CreateGuestResponse { id })))
}

// PATCH /api/events/{id}/guests/move - primitivum pro drag-and-drop.
// `target` je surová identita prvku, na který host dopadl.
#[derive(Debug, Deserialize)]
struct MoveGuestRequest {
    guest_id: i64,
    target: String,
}

async fn move_guest(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    _user: AuthUser,
    Json(req): Json<MoveGuestRequest>,
) -> ApiResult<impl IntoResponse> {
    ensure_session(&state, event_id).await?;

    let moved = state
        .sessions
        .write(event_id, |plan| {
            // nerozpoznaný cíl není chyba - tah se jen tiše zahodí
            match DropTarget::resolve(plan, &req.target) {
                Some(target) => plan.move_guest(req.guest_id, target),
                None => false,
            }
        })
        .ok_or_else(session_missing)?;

    let message = if moved {
        "Host přesazen"
    } else {
        "Host zůstal na původním místě"
    };
    Ok((
        StatusCode::OK,
        Json(json!({"success": true, "moved": moved, "message": message})),
    ))
}

#[derive(Debug, Deserialize)]
struct UnseatGuestRequest {
    guest_id: i64,
}

async fn unseat_guest(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    _user: AuthUser,
    Json(req): Json<UnseatGuestRequest>,
) -> ApiResult<impl IntoResponse> {
    ensure_session(&state, event_id).await?;

    let result = state
        .sessions
        .write(event_id, |plan| plan.unseat_guest(req.guest_id))
        .ok_or_else(session_missing)?;

    match result {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({"success": true, "message": "Host vrácen mezi nezasazené"})),
        )),
        Err(_) => Err(to_api_error(StatusCode::NOT_FOUND, "Host nenalezen")),
    }
}

async fn delete_guest(
    State(state): State<Arc<AppState>>,
    Path((event_id, guest_id)): Path<(i64, i64)>,
    _user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    ensure_session(&state, event_id).await?;

    let result = state
        .sessions
        .write(event_id, |plan| plan.delete_guest(guest_id))
        .ok_or_else(session_missing)?;

    match result {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({"success": true, "message": "Host smazán"})),
        )),
        Err(_) => Err(to_api_error(StatusCode::NOT_FOUND, "Host nenalezen")),
    }
}

/* ---------- IMPORT A ULOŽENÍ ---------- */

// POST /api/events/{id}/floorplan/import - založí hosty z rezervací na
// den události. Import je aditivní, opakování vyrábí duplicity záměrně.
async fn import_reservations(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    ensure_session(&state, event_id).await?;

    let reservations = state
        .backend
        .fetch_reservations()
        .await
        .map_err(|e| backend_error(event_id, e))?;

    let imported = state
        .sessions
        .write(event_id, |plan| plan.import_reservations(&reservations))
        .ok_or_else(session_missing)?;

    tracing::info!(
        "Import do události {} ({}): nových hostů {}",
        event_id,
        user.email,
        imported
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "imported": imported,
            "message": format!("Importováno hostů z rezervací: {}", imported)
        })),
    ))
}

// POST /api/events/{id}/floorplan/save - jediný zápis na backend.
// Odesílá se vždy celý snímek; při selhání zůstává lokální stav netknutý.
async fn save_floor_plan(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    ensure_session(&state, event_id).await?;

    let document = state
        .sessions
        .read(event_id, |plan| plan.to_document())
        .ok_or_else(session_missing)?;

    match state.backend.save_event(&document).await {
        Ok(()) => {
            // po úspěchu se pracovní kopie zahodí, aby příští čtení
            // odráželo stav uložený na serveru
            state.sessions.invalidate(event_id);
            tracing::info!("Zasedací pořádek události {} uložen ({})", event_id, user.email);
            Ok((
                StatusCode::OK,
                Json(json!({"success": true, "message": "Zasedací pořádek uložen"})),
            ))
        }
        Err(e) => {
            tracing::error!("Uložení zasedacího pořádku {} selhalo: {:?}", event_id, e);
            Err(to_api_error(
                StatusCode::BAD_GATEWAY,
                "Nepodařilo se uložit zasedací pořádek. Místní změny zůstávají zachovány, zkuste to prosím znovu.",
            ))
        }
    }
}
