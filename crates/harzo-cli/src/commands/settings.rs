use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use harzo_core::{AspectRatio, GenerationSettings, Quality};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum QualityArg {
    Standard,
    Hd,
    UltraHd,
}

impl From<QualityArg> for Quality {
    fn from(value: QualityArg) -> Self {
        match value {
            QualityArg::Standard => Quality::Standard,
            QualityArg::Hd => Quality::Hd,
            QualityArg::UltraHd => Quality::UltraHd,
        }
    }
}

/// Per-run overrides on top of the `[generation]` defaults in config.toml.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    #[arg(long, value_enum)]
    pub quality: Option<QualityArg>,
    /// 1:1, 4:5, 9:16 or 16:9
    #[arg(long)]
    pub aspect: Option<String>,
    /// Custom size such as 1200x800
    #[arg(long, value_name = "WxH", conflicts_with = "aspect")]
    pub size: Option<String>,
    /// Transformation strength in percent
    #[arg(long)]
    pub strength: Option<i64>,
    #[arg(long)]
    pub negative: Option<String>,
    #[arg(long)]
    pub lighting: Option<String>,
    #[arg(long)]
    pub camera: Option<String>,
    #[arg(long)]
    pub no_face_enhancement: bool,
}

impl SettingsArgs {
    pub fn apply(&self, mut settings: GenerationSettings) -> Result<GenerationSettings> {
        if let Some(quality) = self.quality {
            settings.quality = quality.into();
        }
        if let Some(aspect) = &self.aspect {
            settings.aspect_ratio = match AspectRatio::parse(aspect) {
                Some(AspectRatio::Custom) => bail!("use --size WxH for a custom aspect ratio"),
                Some(ratio) => ratio,
                None => bail!("unknown aspect ratio: {aspect}"),
            };
        }
        if let Some(size) = &self.size {
            let (width, height) = parse_size(size)?;
            settings = settings.with_custom_size(width, height);
        }
        if let Some(strength) = self.strength {
            settings.set_strength(strength);
        }
        if let Some(negative) = &self.negative {
            settings.negative_prompt = negative.clone();
        }
        if let Some(lighting) = &self.lighting {
            settings.lighting = Some(lighting.clone());
        }
        if let Some(camera) = &self.camera {
            settings.camera = Some(camera.clone());
        }
        if self.no_face_enhancement {
            settings.face_enhancement = Some(false);
        }
        Ok(settings)
    }
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let Some((width, height)) = value.split_once(['x', 'X']) else {
        bail!("size must look like 1200x800, got {value}");
    };
    let width: u32 = width.trim().parse()?;
    let height: u32 = height.trim().parse()?;
    if width == 0 || height == 0 {
        bail!("size must be positive, got {value}");
    }
    Ok((width, height))
}
