use super::quality::QualityProfile;

/// Placeholders in `shaders/ocean.wgsl` and the profile field each one takes.
pub const OCEAN_PLACEHOLDERS: [&str; 4] = [
    "{{RAYMARCH_STEPS}}",
    "{{WAVE_ITER_RAYMARCH}}",
    "{{WAVE_ITER_NORMAL}}",
    "{{FBM_OCTAVES}}",
];

/// Ocean fragment source with the tier's iteration counts baked in.
pub fn build_ocean_wgsl(profile: &QualityProfile) -> String {
    specialize(super::OCEAN_WGSL_TEMPLATE, profile)
}

/// Substitutes every placeholder in `template`.
pub fn specialize(template: &str, profile: &QualityProfile) -> String {
    let values = [
        profile.raymarch_steps,
        profile.wave_iter_raymarch,
        profile.wave_iter_normal,
        profile.fbm_octaves,
    ];
    OCEAN_PLACEHOLDERS
        .iter()
        .zip(values)
        .fold(template.to_owned(), |src, (key, value)| {
            src.replace(key, &value.to_string())
        })
}

/// Label used for the GPU objects built from a profile.
pub fn program_label(profile: &QualityProfile) -> String {
    format!(
        "ocean[steps={} march={} normal={} fbm={}]",
        profile.raymarch_steps,
        profile.wave_iter_raymarch,
        profile.wave_iter_normal,
        profile.fbm_octaves
    )
}
