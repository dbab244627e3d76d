use std::panic::{catch_unwind, UnwindSafe};
use std::path::{Path, PathBuf};

use clap::Parser;
use edgekit::{
    image::{Image, ImageRoi},
    imgproc::{
        border::BorderType,
        filter::{filter_laplace_border_with, kernels::MaskSize},
        parallel::ExecutionStrategy,
    },
    io::functional as F,
};

/// File looked up when no input is given.
pub const DEFAULT_INPUT: &str = "sample.pgm";

/// Suffix appended to the input stem to name the default output.
pub const OUTPUT_SUFFIX: &str = "_filterLaplaceBorder.pgm";

#[derive(Parser, Debug)]
#[command(author, version, about = "Laplace edge filter with replicated borders", long_about = None)]
pub struct Args {
    /// path to the input PGM image
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// path to the output PGM image
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// side of the Laplace mask, 3 or 5
    #[arg(long, default_value_t = 5)]
    pub mask_size: usize,

    /// number of worker threads, defaults to the global pool
    #[arg(long)]
    pub threads: Option<usize>,

    /// enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Derive the output path from the input by replacing its extension.
///
/// The file name is cut at its last `.`, so `lena.pgm` becomes
/// `lena_filterLaplaceBorder.pgm` and `.pgm` becomes `_filterLaplaceBorder.pgm`,
/// both in the input's directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = name.rfind('.').map_or(name.as_str(), |dot| &name[..dot]);
    input.with_file_name(format!("{base}{OUTPUT_SUFFIX}"))
}

/// Directories searched for [`DEFAULT_INPUT`], in order: the working
/// directory, the directory of the executable and the bundled test data.
pub fn input_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    dirs.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/data"));
    dirs
}

/// Find [`DEFAULT_INPUT`] in the first directory of `dirs` that holds it.
pub fn find_default_input(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(DEFAULT_INPUT))
        .find(|path| path.is_file())
}

/// Resolve the input image path.
///
/// An explicit path is used as is. Otherwise [`DEFAULT_INPUT`] is searched in
/// [`input_search_dirs`], falling back to the bare file name when none holds it.
pub fn resolve_input(input: Option<PathBuf>) -> PathBuf {
    input
        .or_else(|| find_default_input(&input_search_dirs()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

/// Describe the build and the execution environment.
pub fn runtime_info() -> String {
    format!(
        "edgekit version: {}\ntarget: {}-{}\nworker threads: {}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS,
        rayon::current_num_threads()
    )
}

/// Call `f`, turning a panic into an error so every failure is reported alike.
pub fn catch_failures<T>(
    f: impl FnOnce() -> Result<T, Box<dyn std::error::Error>> + UnwindSafe,
) -> Result<T, Box<dyn std::error::Error>> {
    catch_unwind(f).unwrap_or_else(|_| Err("unknown failure".into()))
}

/// Load the input, filter it and save the result.
///
/// Returns the path of the saved image.
pub fn run(args: Args) -> Result<PathBuf, Box<dyn std::error::Error>> {
    println!("{}\n", runtime_info());

    let input = resolve_input(args.input);
    if std::fs::File::open(&input).is_err() {
        return Err(format!("Unable to open: <{}>", input.display()).into());
    }
    println!("Successfully opened: <{}>", input.display());

    let output = args.output.unwrap_or_else(|| default_output_path(&input));

    let mask_size = MaskSize::try_from(args.mask_size)?;
    let strategy = match args.threads {
        Some(num_threads) => ExecutionStrategy::Fixed(num_threads),
        None => ExecutionStrategy::ParallelRows,
    };

    let src = F::read_image_pgm_mono8(&input)?;
    log::info!("loaded {} image from {}", src.size(), input.display());

    let roi = ImageRoi::full(src.size());
    let mut dst = Image::<u8, 1>::from_size_val(roi.size, 0)?;

    log::debug!("filtering with mask {mask_size} and strategy {strategy}");
    filter_laplace_border_with(
        &src,
        &mut dst,
        mask_size,
        roi,
        &BorderType::Replicate,
        strategy,
    )?;

    F::write_image_pgm_mono8(&output, &dst)?;
    println!("Saved image: {}", output.display());

    Ok(output)
}
