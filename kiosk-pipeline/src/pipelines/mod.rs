pub mod fleet_report;
