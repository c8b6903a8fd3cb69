use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};

use popcover::{
    AudioHandle, Compositor, CoverConfig, CoverSession, CpuSurface, FftAnalyzer,
    FixedRateScheduler, PcmTrack, Surface as _, TextEngine,
};

#[derive(Parser, Debug)]
#[command(name = "popcover", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the cover for a while and export the last frame as `pop-cover.png`.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence of the running cover.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Render configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// WAV file fed to the bar visualizer.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Seed for stickers and bands. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Generate stickers from the first frame.
    #[arg(long)]
    running: bool,

    /// Start with a band pattern.
    #[arg(long)]
    bands: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Simulated time to run before exporting.
    #[arg(long, default_value_t = 2000.0)]
    warmup_ms: f64,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of frames to write.
    #[arg(long)]
    frames: u64,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("popcover=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

/// Offline stand-in for a mounted cover view and its audio player.
struct Driver {
    session: CoverSession<FixedRateScheduler, CpuSurface>,
    audio: AudioHandle,
    feed: Option<(PcmTrack, Rc<RefCell<FftAnalyzer>>)>,
    played_secs: f64,
}

impl Driver {
    fn new(common: &CommonArgs) -> anyhow::Result<Self> {
        let cfg = match &common.config {
            Some(path) => CoverConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => CoverConfig::default(),
        };

        let audio = AudioHandle::new();
        let feed = match &common.audio {
            Some(path) => {
                let track = PcmTrack::load_wav(path)
                    .with_context(|| format!("load audio '{}'", path.display()))?;
                let analyzer = Rc::new(RefCell::new(FftAnalyzer::new(cfg.analyzer)?));
                audio.set_analyzer(analyzer.clone());
                audio.set_playing(true);
                Some((track, analyzer))
            }
            None => None,
        };

        let rng = match common.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let weight = cfg.title.weight.round().clamp(1.0, 1000.0) as u16;
        let text = TextEngine::resolve(cfg.font_path.as_deref(), weight);
        let surface = CpuSurface::new(cfg.canvas)?.with_text_engine(text);
        let scheduler = FixedRateScheduler::new(common.fps)?;
        let compositor = Compositor::new(cfg, audio.clone(), rng)?;

        let mut session = CoverSession::new(compositor, surface, scheduler);
        session.mount();
        if common.running {
            session.compositor_mut().set_running(true);
        }
        if common.bands {
            session.generate_pattern()?;
        }

        Ok(Self {
            session,
            audio,
            feed,
            played_secs: 0.0,
        })
    }

    /// Advance one display refresh, feeding the audio played since the previous one.
    fn tick(&mut self) -> anyhow::Result<f64> {
        let tick = self.session.scheduler_mut().advance();
        if let Some((track, analyzer)) = &self.feed {
            let now_secs = tick.now_ms / 1000.0;
            analyzer
                .borrow_mut()
                .push_samples(track.span(self.played_secs, now_secs));
            self.played_secs = now_secs;
            if now_secs >= track.duration_secs() && self.audio.is_playing() {
                tracing::info!("audio track ended");
                self.audio.set_playing(false);
            }
        }
        for request in tick.requests {
            self.session.on_frame(request, tick.now_ms)?;
        }
        Ok(tick.now_ms)
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut driver = Driver::new(&args.common)?;
    while driver.tick()? < args.warmup_ms {}

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    match driver.session.export(&args.out)? {
        Some(path) => eprintln!("wrote {}", path.display()),
        None => anyhow::bail!("no frame was rendered; nothing exported"),
    }
    driver.session.unmount();
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut driver = Driver::new(&args.common)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    for i in 0..args.frames {
        driver.tick()?;
        let frame = driver
            .session
            .surface()
            .read_pixels()
            .context("surface returned no pixels after drawing")?;
        let path = args.out.join(format!("frame_{i:05}.png"));
        popcover::write_png(&frame, &path)
            .with_context(|| format!("write png '{}'", path.display()))?;
    }

    driver.session.unmount();
    eprintln!("wrote {} frames to {}", args.frames, args.out.display());
    Ok(())
}
