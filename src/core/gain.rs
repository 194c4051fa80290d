//! Distance-to-gain attenuation with explicit amplitude-dB semantics.
//! Amplitude uses 20*log10(·) and dB to ratio uses /20.

/// Attenuation reached at the maximum spatialization distance.
pub const ATTENUATION_FLOOR_DB: f32 = -80.0;

/// Convert dB to an amplitude ratio.
pub fn db_to_amp_ratio(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Gain factor for a sound at `distance` from a speaker. Linear in dB up
/// to `max_distance`, hard zero at and beyond it.
pub fn distance_to_gain(distance: f32, max_distance: f32) -> f32 {
    if distance >= max_distance {
        return 0.0;
    }
    let gain_db = ATTENUATION_FLOOR_DB * distance / max_distance;
    db_to_amp_ratio(gain_db)
}
