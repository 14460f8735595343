use anyhow::{Context, Result};

/// Initialization parameters for the probe's device.
#[derive(Debug, Clone)]
pub struct ProbeInit {
    /// Adapter preference; the probe reports on whatever adapter this selects.
    pub power_preference: wgpu::PowerPreference,

    /// Use the software fallback adapter instead of a hardware one.
    pub force_fallback_adapter: bool,
}

impl Default for ProbeInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
        }
    }
}

/// Adapter and device without a surface.
pub struct HeadlessGpu {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    _queue: wgpu::Queue,
}

impl HeadlessGpu {
    /// Acquires an adapter and device. Asynchronous under wgpu.
    pub async fn new(init: ProbeInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: init.force_fallback_adapter,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ondine-probe device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self {
            adapter,
            device,
            _queue: queue,
        })
    }
}
