//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` on a local HTTP server.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context, Result};
    use clap::Parser;
    use log::{info, warn};

    #[derive(Debug, Parser)]
    #[command(name = "ripple-text", about = "Build and serve the ripple text demo")]
    struct Args {
        /// Port for the local HTTP server.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Serve whatever is already in static/pkg.
        #[arg(long)]
        skip_build: bool,
        /// Directory to serve.
        #[arg(long, default_value = "static")]
        dir: String,
    }

    fn build_wasm(out_dir: &str) -> Result<()> {
        info!("building WASM pkg into {out_dir}");
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", out_dir])
            .status();
        match status {
            Ok(st) if st.success() => Ok(()),
            Ok(st) => bail!("wasm-pack finished with {st}"),
            Err(_) => {
                warn!("wasm-pack not found in PATH; serving stale artifacts (https://rustwasm.github.io/wasm-pack/)");
                Ok(())
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        if !args.skip_build {
            build_wasm(&format!("{}/pkg", args.dir))?;
        }

        info!("serving {} at http://127.0.0.1:{}", args.dir, args.port);
        let status = Command::new("python3")
            .args(["-m", "http.server", &args.port.to_string(), "--directory", &args.dir])
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .context("failed to start python3 http.server")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

// Only meaningful on non-wasm targets.
#[cfg(target_arch = "wasm32")]
fn main() {}
