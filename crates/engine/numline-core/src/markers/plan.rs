//! Single-sequence tick planning with an optional hidden probe.

use log::debug;
use numline_api_core::{approx_eq, format_label, LabelStyle};

use super::{Marker, MarkerPlan, MarkerRequest, Tick};

/// Plan the ticks for one round.
///
/// Endpoints are always present and labeled. Authored text is the label in decimal style;
/// percent style always formats the value. Candidates on an endpoint, outside the
/// range or duplicated are dropped; with no usable candidates the plan is just the two
/// endpoints. Unlabeled ticks are numbered from 1 in track order, starting afresh on
/// every call.
pub fn plan(request: &MarkerRequest) -> MarkerPlan {
    let range = request.range;

    let mut interior: Vec<&Marker> = request
        .candidates
        .iter()
        .filter(|m| {
            if !m.value.is_finite() || !range.contains(m.value) {
                debug!("plan: dropping candidate {} outside range", m.value);
                return false;
            }
            !range.is_endpoint(m.value)
        })
        .collect();
    interior.sort_by(|a, b| {
        range
            .fraction_of(a.value)
            .total_cmp(&range.fraction_of(b.value))
    });
    interior.dedup_by(|a, b| approx_eq(a.value, b.value));

    let label_all = request.visible.is_empty() && request.show_intermediate_numbers;
    let mut pending_probe = request.hidden_target.filter(|t| {
        t.is_finite()
            && range.contains_open(*t)
            && !interior.iter().any(|m| approx_eq(m.value, *t))
    });

    // Percent topics render value·100% even where text was authored.
    let keep_authored = request.label_style == LabelStyle::Decimal;
    let label_for = |authored: Option<&str>, value: f64| -> String {
        authored
            .filter(|_| keep_authored)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| format_label(value, request.label_style))
    };

    let mut ticks = Vec::with_capacity(interior.len() + 3);
    let mut ordinal = 0u32;

    let start_label = label_for(request.start_label.as_deref(), range.start());
    ticks.push(Tick::endpoint(range.start(), start_label));

    for marker in interior {
        if let Some(target) = pending_probe {
            if range.fraction_of(marker.value) > range.fraction_of(target) {
                ticks.push(Tick::probe(target));
                pending_probe = None;
            }
        }
        let labeled = label_all || request.visible.iter().any(|v| approx_eq(*v, marker.value));
        if labeled {
            let label = label_for(marker.label.as_deref(), marker.value);
            ticks.push(Tick::labeled(marker.value, label));
        } else {
            ordinal += 1;
            ticks.push(Tick::unlabeled(marker.value, ordinal));
        }
    }
    if let Some(target) = pending_probe {
        ticks.push(Tick::probe(target));
    }

    let end_label = label_for(request.end_label.as_deref(), range.end());
    ticks.push(Tick::endpoint(range.end(), end_label));

    MarkerPlan {
        ticks,
        unlabeled_count: ordinal,
    }
}
