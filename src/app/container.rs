use std::sync::Arc;

use crate::adapters::{
    FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, TracingLogAdapter, YtDlpAdapter,
};
use crate::app::{FetchInteractor, ProbeInteractor, SplitInteractor};
use crate::config_initialization::Settings;
use crate::ports::{ExecutePort, FetchPort, FsPort, LogPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn split_interactor(&self) -> Arc<SplitInteractor>;
    fn fetch_interactor(&self) -> Arc<FetchInteractor>;
    fn probe_interactor(&self) -> Arc<ProbeInteractor>;
}

pub struct DefaultAppContainer {
    split_interactor: Arc<SplitInteractor>,
    fetch_interactor: Arc<FetchInteractor>,
    probe_interactor: Arc<ProbeInteractor>,
}

impl DefaultAppContainer {
    /// Wire the process-backed adapters configured in `settings`
    pub fn new(settings: &Settings) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(&settings.ffprobe_path));
        let execute_port = Arc::new(FFmpegAdapter::new(&settings.ffmpeg_path));
        let fetch_port = Arc::new(YtDlpAdapter::new(&settings.ytdlp_path));
        let fs_port = Arc::new(FsLocalAdapter::new());
        let log_port = Arc::new(TracingLogAdapter::new(settings.log_level));

        Self::with_ports(probe_port, execute_port, fetch_port, fs_port, log_port)
    }

    /// Wire interactors around arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fetch_port: Arc<dyn FetchPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let fetch_interactor = Arc::new(FetchInteractor::new(
            fetch_port,
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let split_interactor = Arc::new(SplitInteractor::new(
            Arc::clone(&fetch_interactor),
            Arc::clone(&probe_port),
            execute_port,
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let probe_interactor = Arc::new(ProbeInteractor::new(probe_port, fs_port, log_port));

        Self {
            split_interactor,
            fetch_interactor,
            probe_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn split_interactor(&self) -> Arc<SplitInteractor> {
        Arc::clone(&self.split_interactor)
    }

    fn fetch_interactor(&self) -> Arc<FetchInteractor> {
        Arc::clone(&self.fetch_interactor)
    }

    fn probe_interactor(&self) -> Arc<ProbeInteractor> {
        Arc::clone(&self.probe_interactor)
    }
}
