//! Console consumer of the OBJ loader: loads one file and dumps its buffers.

use anyhow::{Context, Result};
use asset::{LoadOptions, NormalPolicy, NormalSource, ObjBuffers};

fn parse_normal_source_arg() -> NormalSource {
    // Accept: --normals=file|synthesize|omit
    let mut source = NormalSource::default();
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--normals=") {
            source = match val.to_ascii_lowercase().as_str() {
                "file" => NormalSource::FromFile,
                "synthesize" | "synth" => NormalSource::Synthesize,
                "omit" | "none" => NormalSource::Omit,
                other => {
                    log::warn!("Unknown normal source '{}', falling back to file.", other);
                    NormalSource::FromFile
                }
            };
        }
    }
    source
}

fn parse_policy_arg() -> NormalPolicy {
    // Accept: --policy=averaged|flat
    let mut policy = NormalPolicy::default();
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--policy=") {
            policy = match val.to_ascii_lowercase().as_str() {
                "averaged" | "smooth" => NormalPolicy::Averaged,
                "flat" => NormalPolicy::Flat,
                other => {
                    log::warn!("Unknown normal policy '{}', falling back to averaged.", other);
                    NormalPolicy::Averaged
                }
            };
        }
    }
    policy
}

fn parse_indexed_arg() -> bool {
    // --indexed[=on|off], on by default
    for arg in std::env::args() {
        if arg == "--indexed" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--indexed=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    true
}

fn parse_path_arg() -> Option<String> {
    std::env::args().skip(1).find(|arg| !arg.starts_with("--"))
}

fn print_buffers(buffers: &ObjBuffers) {
    let layout = buffers.layout;
    println!(
        "Position count: {}, normal count: {}, UV count: {}",
        layout.position, layout.normal, layout.uv
    );
    println!(
        "Buffer size(bytes): {}, index count: {}\n",
        buffers.buffer_size_bytes, buffers.index_count
    );

    for vertex in buffers.vertex_buffer.chunks(buffers.stride()) {
        let row: Vec<String> = vertex.iter().map(|f| format!("{f}")).collect();
        println!("{}", row.join(",\t"));
    }

    if let Some(indices) = &buffers.index_buffer {
        for tri in indices.chunks(3) {
            let row: Vec<String> = tri.iter().map(u32::to_string).collect();
            println!("{}", row.join(", "));
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = parse_path_arg().context("usage: app <file.obj> [--normals=..] [--policy=..] [--indexed=on|off]")?;
    let options = LoadOptions::default()
        .with_normal_source(parse_normal_source_arg())
        .with_normal_policy(parse_policy_arg())
        .with_indexed(parse_indexed_arg());
    log::info!("Loading {} with {:?}", path, options);

    let buffers = asset::load_object_with(&path, options)
        .with_context(|| format!("Failed to load OBJ: {path}"))?;
    print_buffers(&buffers);
    Ok(())
}
