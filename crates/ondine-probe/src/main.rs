mod gpu;

use std::rc::Rc;

use anyhow::Result;
use ondine_gfx::device::{
    AdapterCaps, CollectingSink, DiagnosticSink, FormatDiagnostic, FormatUsage, LogSink,
    is_intel_gpu,
};
use ondine_gfx::logging::{LoggingConfig, init_logging};
use ondine_gfx::msaa::{PipelineKind, ViewContext};
use ondine_gfx::target::TargetDescriptor;
use ondine_gfx::{GfxConfig, GfxContext};
use wgpu::TextureFormat;

use gpu::{HeadlessGpu, ProbeInit};

/// Requests the report covers: (format, usage, random access).
const REQUESTS: &[(TextureFormat, FormatUsage, bool)] = &[
    (TextureFormat::Rgba16Float, FormatUsage::Render, false),
    (TextureFormat::Rgba16Float, FormatUsage::Render, true),
    (TextureFormat::Rg11b10Ufloat, FormatUsage::Render, false),
    (TextureFormat::R16Float, FormatUsage::Linear, false),
    (TextureFormat::R32Float, FormatUsage::LoadStore, true),
    (TextureFormat::Rgba8UnormSrgb, FormatUsage::Blend, false),
    (TextureFormat::Rgba8Unorm, FormatUsage::Render, true),
    (TextureFormat::Rg16Float, FormatUsage::Msaa(4), false),
];

/// Forwards to the log and keeps a copy for the printed report.
struct ReportSink {
    collected: Rc<CollectingSink>,
}

impl DiagnosticSink for ReportSink {
    fn report(&self, diagnostic: FormatDiagnostic) {
        LogSink.report(diagnostic);
        self.collected.report(diagnostic);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let gpu = pollster::block_on(HeadlessGpu::new(ProbeInit::default()))?;
    let info = gpu.adapter.get_info();
    let caps = AdapterCaps::from_adapter(&gpu.adapter);
    log::info!("selected adapter {} ({:?})", info.name, info.backend);

    println!();
    println!("  adapter  {} ({:?})", info.name, info.backend);
    if is_intel_gpu(caps.name()) {
        println!("           intel GPU detected");
    }
    println!();

    let collected = Rc::new(CollectingSink::new());
    let sink = ReportSink {
        collected: Rc::clone(&collected),
    };
    let mut ctx = GfxContext::with_sink(caps, sink, GfxConfig::default());

    println!("  {:<16} {:<10} {:<6} {:<16} notes", "requested", "usage", "rw", "resolved");
    for &(requested, usage, random_access) in REQUESTS {
        let resolved = ctx.resolve_format(requested, usage, random_access);
        let notes = collected
            .take()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        println!(
            "  {:<16} {:<10} {:<6} {:<16} {}",
            format!("{requested:?}"),
            format!("{usage:?}"),
            random_access,
            format!("{resolved:?}"),
            notes,
        );
    }
    println!();

    let format = ctx.resolve_format(TextureFormat::Rgba16Float, FormatUsage::Render, false);
    let view = ViewContext {
        pipeline: PipelineKind::Universal {
            renderer_supports_msaa: true,
        },
        allow_msaa: true,
        quality_samples: 8,
        ..Default::default()
    };

    let mut descriptor = TargetDescriptor::new(1024, 1024, format);
    descriptor.sample_count = ctx.msaa_sample_count(&view, &descriptor);

    let mut slot = None;
    let reference = ctx.ensure_reference(&mut slot);
    let target = ctx.ensure_allocated(&mut slot, descriptor);
    let created = target.create(&gpu.device);
    let view_ok = target.create_view(&reference).is_some();

    println!(
        "  target   {:?} {}x{} {:?} x{} samples, created: {created}, view: {view_ok}",
        target.id(),
        target.descriptor().width,
        target.descriptor().height,
        target.descriptor().format,
        target.descriptor().sample_count,
    );
    println!();

    target.release();
    ctx.shutdown();
    log::info!("probe finished");

    Ok(())
}
