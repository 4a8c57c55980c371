//! Command implementations behind the `trackkit` binary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;

use trackkit_designer::{SegmentDraft, TrackBuilder, TrackFile, TrackGenerator};
use trackkit_settings::Config;

/// Options of the `build` command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub requests: PathBuf,
    pub save: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub gpx: Option<PathBuf>,
    /// Overrides the configured samples per arc
    pub resolution: Option<usize>,
}

/// Options of the `generate` command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub count: usize,
    pub out: Option<PathBuf>,
}

/// Reads a JSON array of segment requests. Fields may be left out.
pub fn load_requests(path: &Path) -> Result<Vec<SegmentDraft>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read segment requests from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid segment requests in {}", path.display()))
}

/// Applies every request in order, filling omitted fields from the track
/// settings. Stops at the first rejected request.
pub fn build_track(config: &Config, requests: &[SegmentDraft]) -> Result<TrackBuilder> {
    let defaults = config.track.segment_defaults();
    let mut builder = config.track_builder();
    for (i, draft) in requests.iter().enumerate() {
        builder
            .apply(&draft.resolve(&defaults))
            .with_context(|| format!("Segment {} was rejected", i + 1))?;
    }
    Ok(builder)
}

/// Human-readable summary of a built track.
pub fn summarize(config: &Config, builder: &TrackBuilder, resolution: usize) -> String {
    let pose = builder.current_pose();
    let mut out = String::new();
    let _ = writeln!(out, "Segments:     {}", builder.len());
    let _ = writeln!(
        out,
        "Total length: {:.2} px ({})",
        builder.total_length(),
        trackkit_core::format_length(
            builder.total_length(),
            trackkit_core::LengthUnit::Meters,
            config.track.pixels_per_meter
        )
    );
    let _ = writeln!(out, "End pose:     {}", pose);
    if let Some(bounds) = builder.bounds(resolution) {
        let _ = writeln!(out, "Bounds:       {}", bounds);
        let fits = bounds.fits_within(
            f64::from(config.canvas.width),
            f64::from(config.canvas.height),
            config.track.half_width_px(),
        );
        let _ = writeln!(out, "Fits canvas:  {}", if fits { "yes" } else { "no" });
    }
    out
}

/// `trackkit build`: apply a request script, print a summary, write outputs.
pub fn run_build(config: &Config, options: &BuildOptions) -> Result<String> {
    let requests = load_requests(&options.requests)?;
    let builder = build_track(config, &requests)?;
    let resolution = options
        .resolution
        .unwrap_or(config.track.sample_resolution);

    tracing::info!(
        segments = builder.len(),
        total_length = builder.total_length(),
        "Built track"
    );

    if let Some(path) = &options.save {
        let name = track_name(&options.requests);
        TrackFile::from_builder(name, &builder).save_to_file(path)?;
    }
    if let Some(path) = &options.csv {
        config
            .coordinate_exporter()
            .write_csv(path, builder.sample_points(resolution))
            .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
    }
    if let Some(path) = &options.gpx {
        config
            .gpx_exporter()
            .write_gpx(path, builder.sample_points(resolution))
            .with_context(|| format!("Failed to export GPX to {}", path.display()))?;
    }

    Ok(summarize(config, &builder, resolution))
}

/// `trackkit generate`: draw valid random tracks and describe them.
///
/// With an output directory each track is saved as `track_<n>_<timestamp>.json`
/// next to a `.txt` file holding its description.
pub fn run_generate<R: Rng + ?Sized>(
    config: &Config,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<String>> {
    let generator = config.track_generator()?;
    let tracks = generator.generate_valid(rng, options.count);

    if let Some(dir) = &options.out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut descriptions = Vec::with_capacity(tracks.len());
    for (i, params) in tracks.iter().enumerate() {
        let description = TrackGenerator::describe(params);
        if let Some(dir) = &options.out {
            let stem = format!("track_{:03}_{}", i + 1, params.timestamp);
            let builder = generator.build(params)?;
            let mut file = TrackFile::from_builder(&stem, &builder);
            file.metadata.description = description.clone();
            file.save_to_file(dir.join(format!("{stem}.json")))?;
            std::fs::write(dir.join(format!("{stem}.txt")), &description)
                .with_context(|| format!("Failed to write description for {stem}"))?;
        }
        descriptions.push(description);
    }

    Ok(descriptions)
}

fn track_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}
