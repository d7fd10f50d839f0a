// src/main.rs
//
// Calculatrice scientifique: point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------
// - NATIF (Linux/Windows/macOS) : options clap, traces, eframe::run_native
//   (`--eval` : calcul direct en console, sans fenêtre)
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports, dead_code))]

use eframe::egui;

mod app;
mod noyau;

use app::{AppCalc, Reglages};

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice scientifique";

/* ------------------------ Ligne de commande (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "calculatrice_sci", version, about = "Calculatrice scientifique (egui)")]
struct Cli {
    /// Mode d’angle au démarrage
    #[arg(long, value_enum, default_value_t = AngleArg::Deg)]
    angle: AngleArg,

    /// Ouvre avec le pavé scientifique
    #[arg(long)]
    scientifique: bool,

    /// Évalue une expression, affiche le résultat et quitte (sans fenêtre)
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    eval: Option<String>,

    /// Filtre de traces si RUST_LOG est absent (ex: "debug", "calculatrice_sci=trace")
    #[arg(long, value_name = "FILTRE", default_value = "warn")]
    log: String,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum AngleArg {
    Deg,
    Rad,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<AngleArg> for noyau::ModeAngle {
    fn from(a: AngleArg) -> Self {
        match a {
            AngleArg::Deg => noyau::ModeAngle::Degres,
            AngleArg::Rad => noyau::ModeAngle::Radians,
        }
    }
}

/// RUST_LOG prime ; sinon le filtre `--log`.
#[cfg(not(target_arch = "wasm32"))]
fn installer_traces(filtre: &str) {
    use tracing_subscriber::EnvFilter;

    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filtre));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(std::io::stderr)
        .init();
}

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    installer_traces(&cli.log);

    if let Some(expr) = cli.eval.as_deref() {
        match noyau::eval_expression(expr) {
            Ok(v) => {
                println!("{}", noyau::format_nombre(v));
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(expr, erreur = %e, "évaluation console refusée");
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    let reglages = Reglages {
        mode_angle: cli.angle.into(),
        scientifique: cli.scientifique,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([320.0, 620.0])
            .with_min_inner_size([300.0, 460.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(reglages)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus (réglages par défaut : DEG, standard)
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
