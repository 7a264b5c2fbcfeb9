fn main() {
    multiversx_sc_meta_lib::cli_main::<payroll_storage::AbiProvider>();
}
