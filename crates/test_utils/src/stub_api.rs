//! Stub Simulations API
//!
//! An in-process implementation of the credit simulations API, bound to an
//! ephemeral local port and seeded with fixture data. Each test starts its own
//! instance, so tests that mutate records (create, update, delete) stay
//! isolated when the test runner executes them in parallel.
//!
//! # Endpoints
//!
//! - `GET    /api/v1/simulations[?name=]`
//! - `POST   /api/v1/simulations`
//! - `GET    /api/v1/simulations/:cpf`
//! - `PUT    /api/v1/simulations/:cpf`
//! - `DELETE /api/v1/simulations/:cpf`

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use domain_simulation::{ConflictError, NotFoundError, Simulation, UnprocessableEntityError};
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::fixtures::SimulationDataFactory;
use crate::validation::validation_errors;

const SIMULATIONS_PATH: &str = "/api/v1/simulations";

pub const NAME_NOT_FOUND: &str = "Name not found";
pub const CPF_ALREADY_EXISTS: &str = "CPF already exists";

/// Message returned when no simulation is stored under `cpf`
pub fn cpf_not_found(cpf: &str) -> String {
    format!("CPF {cpf} not found")
}

/// Error responses of the stub API
#[derive(Debug, Error)]
pub enum StubError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        match self {
            StubError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(NotFoundError::new(message))).into_response()
            }
            StubError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(ConflictError::new(message))).into_response()
            }
            StubError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(UnprocessableEntityError::new(errors)),
            )
                .into_response(),
        }
    }
}

/// State shared across handlers
#[derive(Clone)]
struct StubState {
    simulations: Arc<RwLock<Vec<Simulation>>>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NameFilter {
    name: Option<String>,
}

/// A running stub API, shut down when dropped
pub struct StubSimulationsApi {
    base_url: String,
    simulations: Arc<RwLock<Vec<Simulation>>>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StubSimulationsApi {
    /// Starts a stub seeded with `SimulationDataFactory::all_existing_simulations`
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with(SimulationDataFactory::all_existing_simulations()).await
    }

    /// Starts a stub seeded with `seed`
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound
    pub async fn start_with(seed: Vec<Simulation>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let simulations = Arc::new(RwLock::new(seed));

        let app = create_router(StubState {
            simulations: Arc::clone(&simulations),
            base_url: base_url.clone(),
        });

        let (shutdown, shutdown_signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                shutdown_signal.await.ok();
            });
            if let Err(error) = server.await {
                tracing::error!(%error, "Stub simulations API stopped");
            }
        });

        tracing::info!(%base_url, "Stub simulations API listening");

        Ok(Self {
            base_url,
            simulations,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    /// Scheme, host and port, e.g. `http://127.0.0.1:41234`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the stored simulations
    pub async fn simulations(&self) -> Vec<Simulation> {
        self.simulations.read().await.clone()
    }

    /// Stops the server and waits for it to finish
    pub async fn shutdown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        if let Some(task) = self.task.take() {
            task.await.ok();
        }
    }
}

impl Drop for StubSimulationsApi {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
    }
}

fn create_router(state: StubState) -> Router {
    Router::new()
        .route(SIMULATIONS_PATH, get(list_simulations).post(create_simulation))
        .route(
            &format!("{SIMULATIONS_PATH}/:cpf"),
            get(get_simulation)
                .put(update_simulation)
                .delete(delete_simulation),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Lists all simulations, or those matching `?name=`
async fn list_simulations(
    State(state): State<StubState>,
    Query(filter): Query<NameFilter>,
) -> Result<Json<Vec<Simulation>>, StubError> {
    let simulations = state.simulations.read().await;

    let Some(name) = filter.name else {
        return Ok(Json(simulations.clone()));
    };

    let matching: Vec<Simulation> = simulations
        .iter()
        .filter(|s| s.name == name)
        .cloned()
        .collect();
    if matching.is_empty() {
        return Err(StubError::NotFound(NAME_NOT_FOUND.to_string()));
    }
    Ok(Json(matching))
}

/// Gets a simulation by CPF
async fn get_simulation(
    State(state): State<StubState>,
    Path(cpf): Path<String>,
) -> Result<Json<Simulation>, StubError> {
    let simulations = state.simulations.read().await;
    let simulation = simulations
        .iter()
        .find(|s| s.cpf == cpf)
        .cloned()
        .ok_or_else(|| StubError::NotFound(cpf_not_found(&cpf)))?;

    Ok(Json(simulation))
}

/// Creates a simulation
async fn create_simulation(
    State(state): State<StubState>,
    Json(simulation): Json<Simulation>,
) -> Result<impl IntoResponse, StubError> {
    validate(&simulation)?;

    let mut simulations = state.simulations.write().await;
    if simulations.iter().any(|s| s.cpf == simulation.cpf) {
        return Err(StubError::Conflict(CPF_ALREADY_EXISTS.to_string()));
    }
    simulations.push(simulation.clone());

    let location = format!("{}{SIMULATIONS_PATH}/{}", state.base_url, simulation.cpf);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(simulation)))
}

/// Replaces the simulation stored under `cpf`
async fn update_simulation(
    State(state): State<StubState>,
    Path(cpf): Path<String>,
    Json(simulation): Json<Simulation>,
) -> Result<Json<Simulation>, StubError> {
    validate(&simulation)?;

    let mut simulations = state.simulations.write().await;
    let index = simulations
        .iter()
        .position(|s| s.cpf == cpf)
        .ok_or_else(|| StubError::NotFound(cpf_not_found(&cpf)))?;

    // the new CPF may not belong to any other record
    if simulation.cpf != cpf && simulations.iter().any(|s| s.cpf == simulation.cpf) {
        return Err(StubError::Conflict(CPF_ALREADY_EXISTS.to_string()));
    }

    simulations[index] = simulation.clone();
    Ok(Json(simulation))
}

/// Deletes the simulation stored under `cpf`
async fn delete_simulation(
    State(state): State<StubState>,
    Path(cpf): Path<String>,
) -> Result<StatusCode, StubError> {
    let mut simulations = state.simulations.write().await;
    let index = simulations
        .iter()
        .position(|s| s.cpf == cpf)
        .ok_or_else(|| StubError::NotFound(cpf_not_found(&cpf)))?;

    simulations.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

fn validate(simulation: &Simulation) -> Result<(), StubError> {
    let errors = validation_errors(simulation);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StubError::Validation(errors))
    }
}
