use hyd_solver::io::Scenario;

/// The JSON schema of the scenario file format
pub fn scenario() -> schemars::Schema {
    schemars::schema_for!(Scenario)
}
