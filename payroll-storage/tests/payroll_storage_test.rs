// Sanity check for the storage contract object.
//
// Endpoint-level behavior (writer gating, slot lanes, default values) is
// covered by the blackbox scenario suite next to this file.

use multiversx_sc_scenario::api::DebugApi;

type StorageContract = payroll_storage::ContractObj<DebugApi>;

#[test]
fn test_contract_builds() {
    let _: fn() -> StorageContract = payroll_storage::contract_obj;
}
