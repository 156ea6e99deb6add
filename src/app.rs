use crate::config::AppConfig;
use crate::context::{DocumentAttributes, RenderScope, StyleResolver, ThemeResolver};
use crate::routes::Route;
use crate::services::api::{ApiClientConfig, DashboardClient};
use crate::services::data::{DashboardSnapshot, DataSource, MockDataSource};
use crate::services::preferences::{FilePreferenceStore, PreferenceStore};
use crate::styles::StyleRegistry;
use crate::ui::{apply_theme, render_dashboard, render_gallery, DashboardState};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use eframe::{egui, App, CreationContext, NativeOptions};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::time;
use tracing::{error, info, warn};

pub fn run(config: AppConfig, initial: Route) -> Result<()> {
    let shared_config = Arc::new(config);
    let file_store = FilePreferenceStore::open(shared_config.preferences_file.as_deref())
        .context("opening preference store")?;
    info!(path = %file_store.path().display(), "using preference file");
    let store: Arc<dyn PreferenceStore> = Arc::new(file_store);
    let app_name = shared_config.application_name.clone();
    let native_options = NativeOptions::default();

    eframe::run_native(
        &app_name,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(FinGalleryApp::new(
                cc,
                shared_config,
                store,
                initial,
            )))
        }),
    )
    .map_err(|err| anyhow!(err.to_string()))
}

pub fn load_snapshot_blocking(config: &AppConfig) -> Result<DashboardSnapshot> {
    let runtime = Runtime::new().context("starting tokio runtime")?;
    let source = SnapshotSource::from_config(config)?;
    runtime.block_on(source.load())
}

/// Route, providers and document root for the window. Providers mount after
/// the first frame, so that frame always renders with defaults.
struct PageShell {
    registry: &'static StyleRegistry,
    route: Route,
    style: Option<StyleResolver<'static>>,
    theme: ThemeResolver,
    document: DocumentAttributes,
}

impl PageShell {
    fn new(
        registry: &'static StyleRegistry,
        store: Arc<dyn PreferenceStore>,
        route: Route,
    ) -> Self {
        let style = route
            .style()
            .map(|slug| StyleResolver::new(registry, Some(slug)));
        Self {
            registry,
            route,
            style,
            theme: ThemeResolver::new(store),
            document: DocumentAttributes::new(),
        }
    }

    fn scope(&self) -> RenderScope<'static> {
        let scope = RenderScope::root().with_theme(self.theme.mode());
        match &self.style {
            Some(resolver) => scope.with_style(resolver.active()),
            None => scope,
        }
    }

    fn mount_pending(&mut self) -> bool {
        let mut ran = false;
        if !self.theme.is_mounted() {
            self.theme.mount(&mut self.document);
            ran = true;
        }
        if let Some(resolver) = self.style.as_mut() {
            if !resolver.is_mounted() {
                resolver.mount(&mut self.document);
                ran = true;
            }
        }
        ran
    }

    fn navigate(&mut self, route: Route) {
        info!(from = %self.route, to = %route, "navigating");
        match route.style() {
            Some(slug) => match self.style.as_mut() {
                Some(resolver) => resolver.navigate(Some(slug), &mut self.document),
                None => self.style = Some(StyleResolver::new(self.registry, Some(slug))),
            },
            None => {
                if let Some(mut resolver) = self.style.take() {
                    resolver.unmount(&mut self.document);
                }
            }
        }
        self.route = route;
    }

    fn toggle_theme(&mut self) {
        self.theme.toggle(&mut self.document);
    }
}

struct FinGalleryApp {
    config: Arc<AppConfig>,
    shell: PageShell,
    applied_revision: Option<u64>,
    dashboard_state: DashboardState,
    command_tx: Sender<AppCommand>,
    event_rx: Receiver<AppEvent>,
    status_message: Option<String>,
    worker_failed: bool,
    polling_enabled: bool,
    poller_active: bool,
}

impl FinGalleryApp {
    fn new(
        _cc: &CreationContext<'_>,
        config: Arc<AppConfig>,
        store: Arc<dyn PreferenceStore>,
        initial: Route,
    ) -> Self {
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        spawn_background_worker(config.clone(), command_rx, event_tx);

        let polling_enabled = config.data_source_url.is_some();
        let mut app = Self {
            config,
            shell: PageShell::new(StyleRegistry::builtin(), store, initial),
            applied_revision: None,
            dashboard_state: DashboardState::new(),
            command_tx,
            event_rx,
            status_message: None,
            worker_failed: false,
            polling_enabled,
            poller_active: false,
        };

        app.request_refresh();
        app.start_polling();
        app
    }

    fn request_refresh(&mut self) {
        self.dashboard_state.set_loading();
        if let Err(err) = self.command_tx.send(AppCommand::Refresh) {
            self.worker_failed = true;
            self.status_message = Some(format!("Unable to schedule refresh: {err}"));
            error!(error = %err, "unable to schedule refresh");
        }
    }

    fn start_polling(&mut self) {
        if self.worker_failed || !self.polling_enabled || self.poller_active {
            return;
        }

        let interval = self.config.poll_interval();
        match self.command_tx.send(AppCommand::StartPolling { interval }) {
            Ok(_) => {
                self.poller_active = true;
                info!(interval_secs = interval.as_secs(), "auto-refresh started");
            }
            Err(err) => {
                self.worker_failed = true;
                self.status_message = Some(format!("Unable to start auto-refresh: {err}"));
                error!(error = %err, "unable to start auto-refresh");
            }
        }
    }

    fn stop_polling(&mut self) {
        if !self.poller_active {
            return;
        }

        self.poller_active = false;
        match self.command_tx.send(AppCommand::StopPolling) {
            Ok(_) => info!("auto-refresh stopped"),
            Err(err) => {
                self.worker_failed = true;
                self.status_message = Some(format!("Unable to stop auto-refresh: {err}"));
                error!(error = %err, "unable to stop auto-refresh");
            }
        }
    }

    fn consume_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.worker_failed {
                        error!("background worker disconnected");
                    }
                    self.worker_failed = true;
                    self.poller_active = false;
                    break;
                }
            }
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SnapshotLoaded(snapshot) => {
                self.dashboard_state.update(snapshot);
                self.status_message = None;
            }
            AppEvent::SnapshotFailed(error) => {
                warn!(%error, "dashboard refresh failed");
                self.status_message = Some(format!("Dashboard refresh failed: {error}"));
                self.dashboard_state.set_error(error);
            }
        }
    }

    /// Re-applies visuals only when the document attributes changed.
    fn sync_visuals(&mut self, ctx: &egui::Context) {
        let revision = self.shell.document.revision();
        if self.applied_revision != Some(revision) {
            apply_theme(ctx, &self.shell.document, self.shell.registry);
            self.applied_revision = Some(revision);
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        let registry = self.shell.registry;
        let mut pending = None;

        ui.horizontal(|ui| {
            ui.heading(&self.config.application_name);
            ui.separator();

            if ui
                .selectable_label(self.shell.route == Route::Gallery, "Gallery")
                .clicked()
            {
                pending = Some(Route::Gallery);
            }

            let scope = self.shell.scope();
            if let Ok(active) = scope.style() {
                if ui.button("◀").on_hover_text("Previous style").clicked() {
                    pending = Some(Route::dashboard(registry.previous(active.slug()).slug));
                }
                egui::ComboBox::from_id_salt("style_picker")
                    .selected_text(active.definition().name)
                    .show_ui(ui, |ui| {
                        for style in active.all() {
                            if ui
                                .selectable_label(style.slug == active.slug(), style.name)
                                .clicked()
                            {
                                pending = Some(Route::dashboard(style.slug));
                            }
                        }
                    });
                if ui.button("▶").on_hover_text("Next style").clicked() {
                    pending = Some(Route::dashboard(registry.next(active.slug()).slug));
                }
            }

            ui.separator();
            let label = if scope.is_dark().unwrap_or(false) {
                "Light mode"
            } else {
                "Dark mode"
            };
            if ui.button(label).clicked() {
                self.shell.toggle_theme();
            }

            if ui.button("Refresh").clicked() {
                self.request_refresh();
            }

            let mut auto_refresh = self.polling_enabled;
            if ui.checkbox(&mut auto_refresh, "Auto-refresh").changed() {
                self.polling_enabled = auto_refresh;
                if auto_refresh {
                    self.start_polling();
                } else {
                    self.stop_polling();
                }
            }
        });

        if let Some(route) = pending {
            self.shell.navigate(route);
        }

        if let Some(message) = &self.status_message {
            ui.colored_label(egui::Color32::YELLOW, message);
        }

        if self.worker_failed {
            ui.colored_label(
                egui::Color32::LIGHT_RED,
                "Background worker stopped. Restart after checking the logs.",
            );
        }
    }

    fn render_page(&mut self, ui: &mut egui::Ui) {
        let scope = self.shell.scope();
        let outcome = match self.shell.route.clone() {
            Route::Gallery => match render_gallery(ui, &scope, self.shell.registry) {
                Ok(Some(route)) => {
                    self.shell.navigate(route);
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            },
            Route::Dashboard { .. } => render_dashboard(ui, &scope, &self.dashboard_state),
            Route::NotFound { path } => {
                ui.heading("404");
                ui.label(format!("There is no page at {path}."));
                if ui.button("Back to the gallery").clicked() {
                    self.shell.navigate(Route::Gallery);
                }
                Ok(())
            }
        };

        if let Err(err) = outcome {
            error!(error = %err, "page rendered outside its providers");
            ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
        }
    }
}

impl App for FinGalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.consume_events();
        self.sync_visuals(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_page(ui);
        });

        if self.shell.mount_pending() {
            ctx.request_repaint();
        }
        if self.dashboard_state.is_loading() || self.poller_active {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}

enum AppCommand {
    Refresh,
    StartPolling { interval: Duration },
    StopPolling,
}

enum AppEvent {
    SnapshotLoaded(DashboardSnapshot),
    SnapshotFailed(String),
}

fn spawn_background_worker(
    config: Arc<AppConfig>,
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(error = %err, "failed to start tokio runtime");
                return;
            }
        };

        let source = match SnapshotSource::from_config(&config) {
            Ok(source) => source,
            Err(err) => {
                let _ = event_tx.send(AppEvent::SnapshotFailed(format!(
                    "{err:#}; showing sample data instead"
                )));
                SnapshotSource::Mock
            }
        };
        let mut poller: Option<PollingHandle> = None;

        while let Ok(command) = command_rx.recv() {
            match command {
                AppCommand::Refresh => {
                    let _ = event_tx.send(to_event(runtime.block_on(source.load())));
                }
                AppCommand::StartPolling { interval } => {
                    if let Some(handle) = poller.take() {
                        handle.stop();
                    }
                    poller = Some(start_polling(
                        &runtime,
                        source.clone(),
                        event_tx.clone(),
                        interval,
                    ));
                }
                AppCommand::StopPolling => {
                    if let Some(handle) = poller.take() {
                        handle.stop();
                    }
                }
            }
        }
    });
}

fn to_event(result: Result<DashboardSnapshot>) -> AppEvent {
    match result {
        Ok(snapshot) => AppEvent::SnapshotLoaded(snapshot),
        Err(err) => AppEvent::SnapshotFailed(format!("{err:#}")),
    }
}

struct PollingHandle {
    stop: oneshot::Sender<()>,
}

impl PollingHandle {
    fn stop(self) {
        let _ = self.stop.send(());
    }
}

fn start_polling(
    runtime: &Runtime,
    source: SnapshotSource,
    event_tx: Sender<AppEvent>,
    interval: Duration,
) -> PollingHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel();
    let interval = interval.max(Duration::from_secs(5));

    runtime.spawn(async move {
        let mut ticker = time::interval(interval);
        // The first tick fires immediately and the initial refresh already ran.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let _ = event_tx.send(to_event(source.load().await));
                }
                _ = &mut stop_rx => break,
            }
        }
    });

    PollingHandle { stop: stop_tx }
}

#[derive(Clone)]
enum SnapshotSource {
    Mock,
    Remote(DashboardClient),
}

impl SnapshotSource {
    fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.data_source_url {
            Some(url) => {
                let client_config = ApiClientConfig::try_from_url(url)
                    .with_context(|| format!("invalid data source URL {url}"))?;
                Ok(Self::Remote(DashboardClient::new(client_config)?))
            }
            None => Ok(Self::Mock),
        }
    }

    async fn load(&self) -> Result<DashboardSnapshot> {
        match self {
            Self::Mock => Ok(MockDataSource::new(Utc::now()).snapshot()),
            Self::Remote(client) => client
                .fetch_snapshot()
                .await
                .context("fetching remote snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextError, ThemeMode, THEME_STORAGE_KEY};
    use crate::services::preferences::testing::MemoryStore;

    fn shell(route: Route, store: Arc<MemoryStore>) -> PageShell {
        PageShell::new(StyleRegistry::builtin(), store, route)
    }

    #[test]
    fn first_frame_renders_defaults_then_mounts() {
        let store = Arc::new(MemoryStore::with_value(THEME_STORAGE_KEY, "dark"));
        let mut shell = shell(Route::dashboard("cyberpunk"), store);

        assert!(shell.document.is_empty());
        assert_eq!(shell.scope().theme(), Ok(ThemeMode::Light));

        assert!(shell.mount_pending());
        assert_eq!(shell.document.style(), Some("cyberpunk"));
        assert_eq!(shell.document.theme(), Some("dark"));
        assert_eq!(shell.scope().theme(), Ok(ThemeMode::Dark));

        assert!(!shell.mount_pending());
    }

    #[test]
    fn leaving_a_dashboard_clears_the_style_attribute() {
        let mut shell = shell(Route::dashboard("retro"), Arc::new(MemoryStore::new()));
        shell.mount_pending();

        shell.navigate(Route::dashboard("luxury"));
        assert_eq!(shell.document.style(), Some("luxury"));

        shell.navigate(Route::Gallery);
        assert_eq!(shell.document.style(), None);
        assert!(matches!(
            shell.scope().style(),
            Err(ContextError::OutsideProvider { .. })
        ));

        shell.navigate(Route::dashboard("nature"));
        assert_eq!(shell.document.style(), None);
        assert!(shell.mount_pending());
        assert_eq!(shell.document.style(), Some("nature"));
    }

    #[test]
    fn toggling_persists_the_mode() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell(Route::Gallery, store.clone());
        shell.mount_pending();

        shell.toggle_theme();
        assert_eq!(shell.document.theme(), Some("dark"));
        assert_eq!(
            store.get(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn mock_source_is_used_without_a_url() {
        let config = AppConfig::default();
        let snapshot = load_snapshot_blocking(&config).unwrap();
        assert_eq!(snapshot.transactions.len(), 10);
    }

    #[test]
    fn invalid_url_is_reported() {
        let config = AppConfig {
            data_source_url: Some("not a url".into()),
            ..AppConfig::default()
        };
        let err = load_snapshot_blocking(&config).unwrap_err();
        assert!(format!("{err:#}").contains("invalid data source URL"));
    }
}
