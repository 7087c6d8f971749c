/// Variable and coordinate names as constants for type safety
/// Shared time dimension of every dataset
pub const DATETIME: &str = "DATETIME";
/// CTD depth/pressure coordinate (m)
pub const DEPTH: &str = "DEPTH";
/// LADCP depth coordinate after alignment onto the CTD casts (m)
pub const DEPTH_LADCP: &str = "DEPTH_LADCP";
/// Cast position latitude (degrees_north)
pub const LATITUDE: &str = "LATITUDE";
/// Cast position longitude (degrees_east)
pub const LONGITUDE: &str = "LONGITUDE";
/// Cruise label (`GC_YYYY_MM`) used to group casts by cruise and section
pub const GC_STRING: &str = "GC_STRING";
/// Station cast number
pub const CAST: &str = "CAST";
/// 1 where a cast was matched to a velocity profile, 0 where it was not
pub const TIME_FLAG: &str = "TIME_FLAG";

// CTD profile variables
/// Sea water temperature
pub const TEMP: &str = "TEMP";
/// Practical salinity
pub const PSAL: &str = "PSAL";
/// Sea water pressure
pub const PRES: &str = "PRES";

// LADCP profile variables
/// Eastward water velocity
pub const U_VELOCITY: &str = "u_water_velocity_component";
/// Northward water velocity
pub const V_VELOCITY: &str = "v_water_velocity_component";
/// Velocity error estimate
pub const ERROR_VELOCITY: &str = "error_velocity";
