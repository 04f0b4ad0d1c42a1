use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{FacewarpError, FacewarpResult};

/// Declares a named style/effect enum whose unknown names resolve to a fallback variant.
///
/// Serialized as its lower-case identifier.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident => $fallback_ident:literal,
        { $($variant:ident => $ident:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            #[doc = concat!("`", $fallback_ident, "`, the fallback.")]
            #[default]
            $fallback,
            $(
                #[doc = concat!("`", $ident, "`.")]
                $variant
            ),+
        }

        impl $name {
            /// Every variant, fallback first.
            pub const ALL: &'static [$name] = &[$name::$fallback, $($name::$variant),+];

            /// Lower-case identifier.
            pub fn as_str(self) -> &'static str {
                match self {
                    $name::$fallback => $fallback_ident,
                    $($name::$variant => $ident),+
                }
            }

            /// Case-insensitive lookup; anything unrecognised is the fallback.
            pub fn parse(name: &str) -> Self {
                let name = name.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(name))
                    .unwrap_or_default()
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::parse(&s)
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_str().to_owned()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum! {
    /// One of the eleven distortion strategies.
    EffectKind, fallback = Stretch => "stretch",
    {
        Bulge => "bulge",
        Twist => "twist",
        Dazzle => "dazzle",
        Juggalo => "juggalo",
        Gan3d => "gan3d",
        Contour => "contour",
        CvDazzle => "cvdazzle",
        FacePaint => "facepaint",
        Blur => "blur",
        Mosaic => "mosaic",
    }
}

named_enum! {
    /// `dazzle` pattern set.
    DazzlePattern, fallback = Geometric => "geometric",
    {
        Asymmetric => "asymmetric",
        Minimal => "minimal",
    }
}

named_enum! {
    /// `juggalo` pattern set.
    JuggaloStyle, fallback = Classic => "classic",
    {
        Modern => "modern",
        Extreme => "extreme",
    }
}

named_enum! {
    /// `gan3d` pseudo-3D solid family.
    Gan3dStyle, fallback = Geometric => "geometric",
    {
        Organic => "organic",
        Hybrid => "hybrid",
    }
}

named_enum! {
    /// `contour` makeup style.
    ContourStyle, fallback = Natural => "natural",
    {
        Dramatic => "dramatic",
        Avantgarde => "avantgarde",
    }
}

named_enum! {
    /// `cvdazzle` pattern set.
    CvDazzleStyle, fallback = Mesh => "mesh",
    {
        Asymmetric => "asymmetric",
        Occlusion => "occlusion",
    }
}

named_enum! {
    /// `facepaint` pattern set.
    FacePaintStyle, fallback = Cubist => "cubist",
    {
        Scarf => "scarf",
        Fractal => "fractal",
    }
}

impl EffectKind {
    /// Names of the style variants this effect accepts (empty when it has none).
    pub fn variant_names(self) -> Vec<&'static str> {
        fn names<T: Copy>(all: &[T], f: fn(T) -> &'static str) -> Vec<&'static str> {
            all.iter().copied().map(f).collect()
        }
        match self {
            EffectKind::Dazzle => names(DazzlePattern::ALL, DazzlePattern::as_str),
            EffectKind::Juggalo => names(JuggaloStyle::ALL, JuggaloStyle::as_str),
            EffectKind::Gan3d => names(Gan3dStyle::ALL, Gan3dStyle::as_str),
            EffectKind::Contour => names(ContourStyle::ALL, ContourStyle::as_str),
            EffectKind::CvDazzle => names(CvDazzleStyle::ALL, CvDazzleStyle::as_str),
            EffectKind::FacePaint => names(FacePaintStyle::ALL, FacePaintStyle::as_str),
            EffectKind::Stretch
            | EffectKind::Bulge
            | EffectKind::Twist
            | EffectKind::Blur
            | EffectKind::Mosaic => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-effect style selections and style intensities.
#[serde(default)]
pub struct StyleParams {
    /// `dazzle` pattern.
    pub dazzle: DazzlePattern,
    /// `juggalo` style.
    pub juggalo: JuggaloStyle,
    /// `gan3d` solid family.
    pub gan3d: Gan3dStyle,
    /// Pseudo-3D size/depth scale, `[0, 1]`.
    pub gan3d_intensity: f64,
    /// `contour` style.
    pub contour: ContourStyle,
    /// Makeup strength, `[0, 1]`.
    pub contour_intensity: f64,
    /// `cvdazzle` style.
    pub cvdazzle: CvDazzleStyle,
    /// `facepaint` style.
    pub facepaint: FacePaintStyle,
    /// Blur radius scale, `[0, 1]` (radius = 20 * value).
    pub blur_intensity: f64,
    /// Base mosaic tile side in pixels, `[5, 30]`.
    pub mosaic_size: f64,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            dazzle: DazzlePattern::default(),
            juggalo: JuggaloStyle::default(),
            gan3d: Gan3dStyle::default(),
            gan3d_intensity: 0.5,
            contour: ContourStyle::default(),
            contour_intensity: 0.5,
            cvdazzle: CvDazzleStyle::default(),
            facepaint: FacePaintStyle::default(),
            blur_intensity: 0.5,
            mosaic_size: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Externally controlled knobs, read-only to the render path.
#[serde(default)]
pub struct DistortionParameters {
    /// Active strategy. Unknown names resolve to `stretch`.
    pub effect_type: EffectKind,
    /// Global effect magnitude, `[0, 2]`.
    pub intensity: f64,
    /// Landmark smoothing weight, `[0, 1]`.
    pub smoothing_factor: f64,
    /// Per-effect style selections.
    pub style: StyleParams,
}

impl Default for DistortionParameters {
    fn default() -> Self {
        Self {
            effect_type: EffectKind::default(),
            intensity: 1.0,
            smoothing_factor: 0.3,
            style: StyleParams::default(),
        }
    }
}

impl DistortionParameters {
    /// Accepted `intensity` range.
    pub const INTENSITY_RANGE: (f64, f64) = (0.0, 2.0);
    /// Accepted `style.mosaic_size` range.
    pub const MOSAIC_SIZE_RANGE: (f64, f64) = (5.0, 30.0);

    /// Select the active strategy.
    pub fn with_effect(mut self, effect: EffectKind) -> Self {
        self.effect_type = effect;
        self
    }

    /// Set the global intensity; clamped on normalization.
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    /// Reject non-finite values and clamp everything into its control range.
    pub fn normalized(&self) -> FacewarpResult<Self> {
        fn clamp(name: &str, v: f64, (lo, hi): (f64, f64)) -> FacewarpResult<f64> {
            if !v.is_finite() {
                return Err(FacewarpError::validation(format!("{name} must be finite")));
            }
            Ok(v.clamp(lo, hi))
        }

        let unit = (0.0, 1.0);
        let s = &self.style;
        Ok(Self {
            effect_type: self.effect_type,
            intensity: clamp("intensity", self.intensity, Self::INTENSITY_RANGE)?,
            smoothing_factor: clamp("smoothing_factor", self.smoothing_factor, unit)?,
            style: StyleParams {
                gan3d_intensity: clamp("style.gan3d_intensity", s.gan3d_intensity, unit)?,
                contour_intensity: clamp("style.contour_intensity", s.contour_intensity, unit)?,
                blur_intensity: clamp("style.blur_intensity", s.blur_intensity, unit)?,
                mosaic_size: clamp("style.mosaic_size", s.mosaic_size, Self::MOSAIC_SIZE_RANGE)?,
                ..s.clone()
            },
        })
    }

    /// Style intensity that applies to the active effect, if it has one.
    pub fn style_intensity(&self) -> Option<f64> {
        match self.effect_type {
            EffectKind::Gan3d => Some(self.style.gan3d_intensity),
            EffectKind::Contour => Some(self.style.contour_intensity),
            EffectKind::Blur => Some(self.style.blur_intensity),
            _ => None,
        }
    }

    /// Name of the style variant that applies to the active effect, if it has one.
    pub fn style_variant(&self) -> Option<&'static str> {
        let s = &self.style;
        match self.effect_type {
            EffectKind::Dazzle => Some(s.dazzle.as_str()),
            EffectKind::Juggalo => Some(s.juggalo.as_str()),
            EffectKind::Gan3d => Some(s.gan3d.as_str()),
            EffectKind::Contour => Some(s.contour.as_str()),
            EffectKind::CvDazzle => Some(s.cvdazzle.as_str()),
            EffectKind::FacePaint => Some(s.facepaint.as_str()),
            _ => None,
        }
    }

    /// Select a style variant of the active effect by name; effects without variants ignore it.
    pub fn with_style_variant(mut self, name: &str) -> Self {
        let s = &mut self.style;
        match self.effect_type {
            EffectKind::Dazzle => s.dazzle = DazzlePattern::parse(name),
            EffectKind::Juggalo => s.juggalo = JuggaloStyle::parse(name),
            EffectKind::Gan3d => s.gan3d = Gan3dStyle::parse(name),
            EffectKind::Contour => s.contour = ContourStyle::parse(name),
            EffectKind::CvDazzle => s.cvdazzle = CvDazzleStyle::parse(name),
            EffectKind::FacePaint => s.facepaint = FacePaintStyle::parse(name),
            EffectKind::Stretch
            | EffectKind::Bulge
            | EffectKind::Twist
            | EffectKind::Blur
            | EffectKind::Mosaic => {}
        }
        self
    }

    /// Set the style intensity of the active effect, if it has one.
    pub fn with_style_intensity(mut self, value: f64) -> Self {
        match self.effect_type {
            EffectKind::Gan3d => self.style.gan3d_intensity = value,
            EffectKind::Contour => self.style.contour_intensity = value,
            EffectKind::Blur => self.style.blur_intensity = value,
            _ => {}
        }
        self
    }

    /// Parse and normalize a JSON parameter document.
    pub fn from_json_str(json: &str) -> FacewarpResult<Self> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| FacewarpError::serde(e.to_string()))?;
        params.normalized()
    }

    /// Read, parse and normalize a JSON parameter file.
    pub fn from_path(path: impl AsRef<Path>) -> FacewarpResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read params '{}'", path.display()))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
