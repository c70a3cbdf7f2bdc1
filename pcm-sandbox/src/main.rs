mod error;
mod export;

use error::SandboxError;
use log::*;
use pcm_core::SamplePoint;
use pcm_mesh::UvMode;
use pcm_session::{ChannelRenderer, FootprintIndex, MeshSession, MeshSettings};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(StructOpt, Clone)]
#[structopt(
    name = "pcm-sandbox",
    about = "A tool for replaying recorded point cloud frames through the mesher"
)]
struct Opt {
    /// The file where settings are specified.
    ///
    /// This is in the format of `pcm_session::MeshSettings`. Missing fields take their defaults.
    #[structopt(short, long, default_value = "pcm-settings.json")]
    settings: PathBuf,
    /// The viewport width the screen points were recorded in
    #[structopt(long, default_value = "1170.0")]
    width: f64,
    /// The viewport height the screen points were recorded in
    #[structopt(long, default_value = "2532.0")]
    height: f64,
    /// Grow a skirt of neighbours around every accepted quad
    #[structopt(long)]
    grow: bool,
    /// Override the texture coordinate layout from the settings
    #[structopt(long)]
    uv_mode: Option<String>,
    /// Output PLY file to deposit the last mesh
    #[structopt(short, long)]
    output: Option<PathBuf>,
    /// JSON file holding a list of frames, each a list of samples
    #[structopt(parse(from_os_str))]
    frames: PathBuf,
}

fn main() -> Result<(), SandboxError> {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let settings = std::fs::File::open(&opt.settings)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok());
    if settings.is_some() {
        info!("loaded existing settings");
    } else {
        info!("used default settings");
    }
    let mut settings: MeshSettings = settings.unwrap_or_default();
    if opt.grow {
        settings.grow_accepted = true;
    }
    if let Some(name) = &opt.uv_mode {
        settings.uv_mode = UvMode::parse_or_fallback(name);
    }

    let frames = load_frames(&opt.frames)?;
    info!("loaded {} frames", frames.len());

    let session = MeshSession::new(settings, opt.width, opt.height, FootprintIndex::new());
    let (mut renderer, batches) = ChannelRenderer::channel();
    let reports = session.run(&mut frames.into_iter(), &mut renderer);
    for (pass, report) in reports.iter().enumerate() {
        info!(
            "pass {}: {} samples, {} triangles, {} accepted, {} too large, {} overlapping, {} quads",
            pass,
            report.sampled,
            report.triangles,
            report.accepted,
            report.rejected_size,
            report.rejected_overlap,
            report.quads
        );
    }
    drop(renderer);

    let last = batches.try_iter().last();
    match (opt.output, last) {
        (Some(path), Some(batch)) => {
            info!("exporting the mesh");
            std::fs::File::create(&path)
                .and_then(|file| export::export(std::io::BufWriter::new(file), &batch))
                .map_err(|source| SandboxError::WriteMesh {
                    path: path.clone(),
                    source,
                })?;
            info!(
                "wrote {} triangles to {}",
                batch.buffers.triangle_count(),
                path.display()
            );
        }
        (Some(path), None) => {
            warn!("no mesh was built, so not writing {}", path.display());
        }
        (None, _) => {}
    }
    Ok(())
}

fn load_frames(path: &Path) -> Result<Vec<Vec<SamplePoint>>, SandboxError> {
    let file = std::fs::File::open(path).map_err(|source| SandboxError::OpenFrames {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
        SandboxError::ParseFrames {
            path: path.to_owned(),
            source,
        }
    })
}
