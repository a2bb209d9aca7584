// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Builds `index.html` from the nade images in `./img` and `index-template.html`.
//! Takes no arguments; any failure aborts the run with a non-zero exit status.
use nade_core::config::SiteConfig;
use nade_core::export::build_site;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = simple_logger::init_with_level(log::Level::Info) {
        use std::io::Write as _;
        #[expect(clippy::let_underscore_must_use)]
        let _ = writeln!(std::io::stderr(), "Error setting up logging: {e}");
    }

    log::info!("Copyright (C) 2025 aidan-es");
    log::info!("This software comes with ABSOLUTELY NO WARRANTY.");
    log::info!("Licensed under the GNU AGPLv3.");

    let config = SiteConfig::default();
    log::info!(
        "Building {} from {} using {}",
        config.output_path.display(),
        config.image_dir.display(),
        config.template_path.display()
    );

    match build_site(&config) {
        Ok(summary) => {
            log::info!(
                "Wrote {} nades from {} images to {}",
                summary.nades,
                summary.images,
                summary.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Build failed: {e}");
            ExitCode::FAILURE
        }
    }
}
