// Sanity check for the payroll contract object.
//
// The contract keeps all domain state in the detached storage contract via
// sync calls, so endpoint behavior is exercised in the blackbox scenario
// suite, which deploys both contracts in the Rust VM.

use multiversx_sc_scenario::api::DebugApi;

type PayrollContract = team_payroll::ContractObj<DebugApi>;

#[test]
fn test_contract_builds() {
    let _: fn() -> PayrollContract = team_payroll::contract_obj;
}
