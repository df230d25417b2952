use clap::Parser;
use std::path::PathBuf;
use uvdecay::config::AppConfig;
use uvdecay::sim::PlasticKind;
use uvdecay::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plastic to simulate: pet (fast), pp (moderate), pe (slow)
    #[arg(long)]
    material: Option<PlasticKind>,

    /// UV intensity in percent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    uv: Option<u8>,

    /// Render the chart to a PNG file instead of opening a window
    #[arg(long)]
    export: Option<PathBuf>,

    /// Export width in pixels
    #[arg(long, default_value = "800")]
    width: usize,

    /// Export height in pixels
    #[arg(long, default_value = "450")]
    height: usize,

    /// Frames to simulate before exporting (default: until fully decayed)
    #[arg(long)]
    ticks: Option<u32>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(material) = args.material {
        config.ui.default_material = material;
    }
    if let Some(uv) = args.uv {
        config.ui.default_uv_intensity = uv;
    }

    if args.print_config {
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())?;
        println!("{}", text);
        return Ok(());
    }

    // Headless mode
    if let Some(output_path) = args.export {
        let request = uvdecay::export::ExportRequest {
            material: config.ui.default_material,
            uv_intensity: config.ui.default_uv_intensity,
            width: args.width,
            height: args.height,
            ticks: args.ticks,
            params: config.simulation,
        };
        return uvdecay::export::export_png(&request, output_path);
    }

    log::info!("Starting UV Decay");

    pollster::block_on(run(config))
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(config).await?;
    App::run(event_loop, app)
}
