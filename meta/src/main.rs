fn main() {
    multiversx_sc_meta_lib::cli_main::<zk_fund::AbiProvider>();
}
