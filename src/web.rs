//! HTTP visualizer.
//!
//! - `GET /` serves a page that polls the match state.
//! - `GET /game-state` returns the [`SpectatorState`] as JSON.
//! - `GET /health` returns `ok`.

use crate::spectator::{SharedSpectator, SpectatorState};
use anyhow::{Context, Result};
use axum::{Json, Router, extract::State, response::Html, routing::get};
use tokio::net::TcpListener;
use tracing::{debug, info, instrument};

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>strictly_morris</title>
<style>
body { font-family: monospace; background: #111; color: #ddd; }
pre { font-size: 18px; }
.blue { color: #4aa3ff; }
.orange { color: #ffa040; }
</style>
</head>
<body>
<h1 id="game"></h1>
<pre id="board"></pre>
<p id="status"></p>
<ol id="moves"></ol>
<script>
function draw(view) {
  let out = "  ";
  for (let c = 0; c < view.size; c++) out += " " + String.fromCharCode(97 + c);
  out += "\n";
  for (let r = 1; r <= view.size; r++) {
    out += r + " ";
    for (let c = 0; c < view.size; c++) {
      const label = String.fromCharCode(97 + c) + r;
      out += " ";
      if (!(label in view.cells)) { out += " "; continue; }
      const who = view.cells[label];
      out += who ? '<span class="' + who + '">' + (who === "blue" ? "B" : "O") + "</span>" : ".";
    }
    out += "\n";
  }
  if (view.hands) out += "hands: blue " + view.hands.blue + ", orange " + view.hands.orange + "\n";
  return out;
}
async function refresh() {
  const state = await (await fetch("/game-state")).json();
  document.getElementById("game").textContent = state.game;
  const last = state.snapshots[state.snapshots.length - 1];
  if (last) document.getElementById("board").innerHTML = draw(last.board);
  document.getElementById("status").textContent =
    state.game_over ? state.message : (last ? "to move: " + last.board.to_move : "waiting");
  const moves = document.getElementById("moves");
  moves.innerHTML = "";
  for (const s of state.snapshots) {
    if (!s.last_move) continue;
    const li = document.createElement("li");
    li.textContent = s.mover + ": " + s.last_move;
    moves.appendChild(li);
  }
  if (!state.game_over) setTimeout(refresh, 500);
}
refresh();
</script>
</body>
</html>
"#;

#[instrument]
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[instrument(skip(state))]
async fn game_state(State(state): State<SharedSpectator>) -> Json<SpectatorState> {
    let snapshot = state.read().await.clone();
    debug!(snapshots = snapshot.snapshots.len(), "Serving game state");
    Json(snapshot)
}

#[instrument]
async fn health() -> &'static str {
    "ok"
}

/// Routes of the visualizer.
pub fn router(state: SharedSpectator) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/game-state", get(game_state))
        .route("/health", get(health))
        .with_state(state)
}

/// Serves the visualizer on `0.0.0.0:port` until the process exits.
#[instrument(skip(state))]
pub async fn serve(port: u16, state: SharedSpectator) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind visualizer port {}", port))?;
    info!(port, "Visualizer ready at http://localhost:{}/", port);
    axum::serve(listener, router(state))
        .await
        .context("Visualizer server failed")
}
