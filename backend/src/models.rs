pub use shared::{
    ApiError, ChargingStopEstimate, ClockTime, Coordinate, EstimateRequest, MapView,
    PlanTripRequest, PlannedVehicle, TravelTime, TripEstimate, TripPlan, TripSummary,
    VehicleListing, VehicleProfile, Waypoint,
};
