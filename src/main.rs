use clap::Parser;
use icon_gallery::{config, generate, output, pipeline, publish};
use std::path::Path;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "icon-gallery")]
#[command(about = "Static icon gallery for the frontend repositories")]
#[command(long_about = "\
Static icon gallery for the frontend repositories

Run from the gallery directory. Sibling repositories are read from the
workspace root (the parent directory by default):

  workspace/
  ├── icon-gallery/                # run here
  │   ├── gallery.toml             # optional overrides
  │   └── index.html               # generated
  ├── empire/
  │   ├── node_modules/@anatomy-financial/anatomy-ui-core/dist/icons/
  │   └── src/                     # scanned for icon usage
  └── anatomy-financials-ui/
      └── src/components/svgs/     # custom SVG components

Icons are collected from the shared package in every repository, from the
custom SVG directories, and from icon-font classes (pi-*) referenced in
application sources.")]
#[command(version = version_string())]
struct Cli {
    /// Open the generated page in the default viewer
    #[arg(long)]
    open: bool,

    /// Commit and push the generated page with git
    #[arg(long)]
    push: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let gallery_dir = std::env::current_dir()?;
    let config = config::load_config(&gallery_dir)?;
    let workspace_root = config.workspace_root(&gallery_dir);
    let output_path = config.output_path(&gallery_dir);

    let gallery = pipeline::build(&config, &workspace_root)?;

    println!("==> Stage 1: Collecting shared package icons");
    output::print_sources(&gallery.core_sources);

    println!("==> Stage 2: Collecting custom SVG icons");
    output::print_sources(&gallery.custom_sources);

    println!("==> Stage 3: Scanning application sources");
    output::print_usage(&gallery.usage_apps);

    println!("==> Stage 4: Checking for redundant icons");
    output::print_redundancy(&gallery.redundancy);

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    println!("==> Stage 5: Generating HTML → {}", output_path.display());
    let document = generate::render_gallery(&gallery.catalog, &gallery.redundancy, &config, &today)?;
    generate::write_gallery(&output_path, document)?;
    output::print_summary(&gallery.catalog, Path::new(&config.output_file));

    // A failed publish still leaves the page on disk and opens it.
    let mut publish_error = None;
    if cli.push {
        println!("==> Publishing");
        match publish::publish(
            &gallery_dir,
            &config.output_file,
            &config.publish.commit_message,
            &today,
        ) {
            Ok(outcome) => output::print_publish(&outcome, config.publish.site_url.as_deref()),
            Err(e) => publish_error = Some(e),
        }
    }

    if cli.open
        && let Err(e) = publish::open_in_viewer(&output_path)
    {
        eprintln!("Could not open {}: {e}", output_path.display());
    }

    if let Some(e) = publish_error {
        return Err(e.into());
    }

    Ok(())
}
