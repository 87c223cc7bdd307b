// ============================================================================
// WalletList - Liste de wallets crypto en TUI
// ============================================================================
// Affiche les wallets d'un portfolio : nom, solde crypto dans la dénomination
// choisie, valeur fiat, tokens activés. Les taux de change sont rafraîchis en
// arrière-plan depuis Yahoo Finance.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Async dans sync : tokio::runtime::Runtime dans un thread worker
// 4. Point de composition : c'est ici qu'on choisit le renderer des lignes
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use walletlist::api::fetch_exchange_rates;
use walletlist::app::App;
use walletlist::config::Config;
use walletlist::models::{ExchangeRates, Portfolio};
use walletlist::row::{RowRenderer, SlowLog, WalletRowComponent};
use walletlist::state::StateSnapshot;
use walletlist::ui::{events::EventHandler, render};

// ============================================================================
// Ligne de commande
// ============================================================================

/// Liste de wallets crypto dans le terminal
#[derive(Parser, Debug)]
#[command(name = "walletlist", version = env!("CARGO_PKG_VERSION"), about = "Crypto wallet list in the terminal")]
struct Cli {
    /// Fichier de configuration JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fichier portfolio JSON (remplace celui de la configuration)
    #[arg(short, long, value_name = "FILE")]
    portfolio: Option<PathBuf>,

    /// Ne pas récupérer les taux de change au démarrage
    #[arg(long)]
    no_fetch: bool,
}

// ============================================================================
// AppCommand / AppResult : communication avec le worker thread
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Récupérer les taux des devises données
    RefreshRates {
        currency_codes: Vec<String>,
        fiat_code: String,
    },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Taux récupérés
    RatesLoaded(ExchangeRates),

    /// Échec de la récupération
    RatesError { error: String },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier, avec rotation quotidienne.
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ./logs/walletlist.log
/// RUST_LOG=walletlist=trace cargo run   # voir aussi les temps de rendu
/// ```
fn init_logging(log_dir: &std::path::Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "walletlist.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: walletlist::row::view)
                .with_thread_ids(true) // Inclut l'ID du thread (worker vs UI)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour walletlist, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "walletlist=debug,info".into()),
        )
        .init();

    info!(log_dir = %log_dir.display(), "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(portfolio) = cli.portfolio {
        config.portfolio_path = portfolio;
    }
    if cli.no_fetch {
        config.fetch_rates = false;
    }

    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });
    info!(?config, "WalletList starting up");

    let portfolio = Portfolio::load(&config.portfolio_path)?;
    let currency_codes = portfolio.currency_codes();
    let fiat_code = portfolio.settings.fiat_code().to_string();

    // ========================================
    // Composition : renderer des lignes
    // ========================================
    // Le SlowLog n'est ajouté que si la configuration le demande
    let component = WalletRowComponent::new(config.row_options());
    let renderer: Box<dyn RowRenderer + Send> = if config.slowlog.enabled {
        info!(threshold_ms = config.slowlog.threshold_ms, "Row render timing enabled");
        Box::new(SlowLog::new(component, config.slowlog.threshold()))
    } else {
        Box::new(component)
    };

    let state = StateSnapshot::new(portfolio.settings, portfolio.rates, config.locale);
    let app = App::new(portfolio.wallets, state, renderer)
        .context("Impossible d'afficher la liste des wallets")?;
    let app = Arc::new(Mutex::new(app));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, app.clone());

    if config.fetch_rates {
        let _ = command_tx.send(AppCommand::RefreshRates {
            currency_codes: currency_codes.clone(),
            fiat_code: fiat_code.clone(),
        });
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;
    let events = EventHandler::new();

    info!("Starting event loop");
    let refresh = AppCommand::RefreshRates {
        currency_codes,
        fiat_code,
    };
    let result = run(&mut terminal, app, &events, command_tx, result_rx, refresh);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// Thread séparé avec son propre runtime tokio : les appels réseau ne bloquent
// jamais l'UI.
// ============================================================================

fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime, worker disabled");
                return;
            }
        };

        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                AppCommand::RefreshRates {
                    currency_codes,
                    fiat_code,
                } => {
                    if let Ok(mut app_lock) = app.lock() {
                        app_lock.start_loading(Some(format!(
                            "Récupération des taux {} ({} devises)...",
                            fiat_code,
                            currency_codes.len()
                        )));
                    }

                    let result = runtime.block_on(fetch_exchange_rates(&currency_codes, &fiat_code));

                    let message = match result {
                        Ok(rates) => AppResult::RatesLoaded(rates),
                        Err(e) => {
                            error!(error = ?e, "Failed to refresh exchange rates");
                            AppResult::RatesError { error: e.to_string() }
                        }
                    };
                    let _ = result_tx.send(message);

                    if let Ok(mut app_lock) = app.lock() {
                        app_lock.stop_loading();
                    }
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Résultats du worker (taux)
//   1. Render
//   2. Input
//   3. Update
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
    refresh: AppCommand,
) -> Result<()> {
    loop {
        {
            let app_lock = lock(&app)?;
            if !app_lock.is_running() {
                break;
            }
        }

        // 0. RÉSULTATS
        match result_rx.try_recv() {
            Ok(AppResult::RatesLoaded(rates)) => {
                info!(rates = rates.rates.len(), "Applying exchange rates");
                lock(&app)?.apply_rates(rates)?;
            }
            Ok(AppResult::RatesError { error }) => {
                lock(&app)?.status_message = Some(format!("Taux indisponibles : {}", error));
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("Worker thread disconnected!");
            }
        }

        // 1. RENDER
        {
            let app_lock = lock(&app)?;
            terminal.draw(|frame| render(frame, &app_lock))?;
        }

        // 2. INPUT
        if let Ok(event) = events.next() {
            let mut app_lock = lock(&app)?;
            handle_event(&mut app_lock, event, &command_tx, &refresh)?;
        }

        // 3. UPDATE
        lock(&app)?.tick();
    }

    Ok(())
}

/// Verrouille l'état partagé ; un mutex empoisonné devient une erreur
fn lock(app: &Arc<Mutex<App>>) -> Result<std::sync::MutexGuard<'_, App>> {
    app.lock()
        .map_err(|_| anyhow::anyhow!("État de l'application corrompu (mutex empoisonné)"))
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// Les erreurs de rendu (politique FailFast) remontent et arrêtent l'app.
fn handle_event(
    app: &mut App,
    event: walletlist::ui::events::Event,
    command_tx: &mpsc::Sender<AppCommand>,
    refresh: &AppCommand,
) -> Result<()> {
    use walletlist::ui::events::{
        is_back_event, is_cycle_denomination_event, is_down_event, is_press_event, is_quit_event,
        is_refresh_event, is_toggle_fiat_event, is_up_event, Event,
    };

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_up_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            app.navigate_down();
        }

        // Entrée : appui sur la ligne -> callback de sélection
        Event::Key(_) if is_press_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            app.press_selected();
        }

        Event::Key(_) if is_back_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            debug!("User returned to wallet list");
            app.show_list();
        }

        Event::Key(_) if is_toggle_fiat_event(&event) => {
            app.cancel_quit();
            app.toggle_fiat_visibility()?;
        }

        Event::Key(_) if is_cycle_denomination_event(&event) && app.is_on_list() => {
            app.cancel_quit();
            app.cycle_denomination()?;
        }

        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            if app.is_loading_data() {
                debug!("Refresh already in progress, ignoring");
            } else {
                info!("User requested rates refresh");
                let _ = command_tx.send(refresh.clone());
            }
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation si active
            app.cancel_quit();
        }

        Event::Tick => {}
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
