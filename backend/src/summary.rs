use std::fmt::Write;

use crate::{
    config::EstimatorConfig,
    estimator::clock_at,
    models::{ClockTime, TravelTime, TripPlan, TripSummary},
};

/// Aggregate a trip into its headline numbers.
///
/// Travel time uses a flat `charging_hours_per_stop` allowance rather than
/// the per-stop charging estimates. The final battery is what is left of
/// the last partial range:
/// `round((range - total % range) / range * 100)`.
pub fn summarize(
    total_distance_miles: f64,
    stop_count: usize,
    range_miles: f64,
    config: &EstimatorConfig,
) -> TripSummary {
    let driving_hours = total_distance_miles / config.average_speed_mph;
    let total_hours = driving_hours + config.charging_hours_per_stop * stop_count as f64;
    let total_travel_time = split_hours(total_hours);

    let remaining_range = range_miles - (total_distance_miles % range_miles);
    let final_battery_percent = (remaining_range / range_miles * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    let travel_minutes = total_travel_time
        .hours
        .saturating_mul(60)
        .saturating_add(total_travel_time.minutes);
    let destination_arrival =
        clock_at(f64::from(config.departure_minutes().saturating_add(travel_minutes)));

    TripSummary {
        total_distance_miles,
        total_travel_time,
        stop_count,
        final_battery_percent,
        destination_arrival,
    }
}

/// Whole hours and minutes; minutes that round up to 60 carry over.
pub fn split_hours(total_hours: f64) -> TravelTime {
    let total_minutes = (total_hours.max(0.0) * 60.0).round() as u32;
    TravelTime {
        hours: total_minutes / 60,
        minutes: total_minutes % 60,
    }
}

pub fn format_clock(time: ClockTime) -> String {
    let suffix = if time.hour >= 12 { "PM" } else { "AM" };
    let hour = match time.hour % 12 {
        0 => 12,
        h => h,
    };
    let mut formatted = format!("{hour}:{:02} {suffix}", time.minute);
    match time.day_offset {
        0 => {}
        1 => formatted.push_str(" (+1 day)"),
        n => {
            let _ = write!(formatted, " (+{n} days)");
        }
    }
    formatted
}

pub fn format_travel_time(time: TravelTime) -> String {
    format!(
        "{} {} {} {}",
        time.hours,
        plural(time.hours, "hour"),
        time.minutes,
        plural(time.minutes, "minute")
    )
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Plain-text itinerary for terminals.
pub fn render_itinerary(plan: &TripPlan, departure: ClockTime) -> String {
    let summary = &plan.summary;
    let range = plan.vehicle.range_miles;
    let mut out = String::new();

    let _ = writeln!(out, "{} to {}", plan.start, plan.destination);
    let _ = writeln!(out, "{}", plan.vehicle.name);
    let _ = writeln!(out, "Total Distance: {} miles", summary.total_distance_miles);
    let _ = writeln!(
        out,
        "Estimated Travel Time: {}",
        format_travel_time(summary.total_travel_time)
    );
    let _ = writeln!(out, "Charging Stops: {}", summary.stop_count);
    let _ = writeln!(out);

    let _ = writeln!(out, "Start: {}", plan.start);
    let _ = writeln!(out, "  Departure at {}", format_clock(departure));
    let _ = writeln!(out, "  Battery: 100% ({range} miles range)");

    for stop in &plan.stops {
        let _ = writeln!(out, "Charging Stop: {}", stop.label);
        let _ = writeln!(
            out,
            "  Arrival at {} (Battery: {}%)",
            format_clock(stop.arrival),
            stop.battery_percent_at_arrival
        );
        let _ = writeln!(
            out,
            "  Charging Time: {} minutes ({}% -> {}%)",
            stop.charging_minutes, stop.battery_percent_at_arrival, stop.charge_target_percent
        );
    }

    let remaining_miles = (f64::from(summary.final_battery_percent) / 100.0 * range).round();
    let _ = writeln!(out, "Destination: {}", plan.destination);
    let _ = writeln!(
        out,
        "  Arrival at {}",
        format_clock(summary.destination_arrival)
    );
    let _ = writeln!(
        out,
        "  Battery: {}% (approximately {remaining_miles} miles remaining)",
        summary.final_battery_percent
    );
    out
}
