use consensus_core::config::{ConsensusParams, NetworkParams};
use consensus_core::{Hash, ZERO_HASH};
use consensus_pow::{check_header_proof_of_work, check_proof_of_work};
use hex_literal::hex;

const MAX_HASH: Hash = Hash::from_bytes([0xff; 32]);

#[test]
fn invalid_targets_are_rejected() {
    let params = ConsensusParams::main();
    // negative
    assert!(!check_proof_of_work(&ZERO_HASH, 0x0492_3456, &params));
    // zero
    assert!(!check_proof_of_work(&ZERO_HASH, 0, &params));
    assert!(!check_proof_of_work(&ZERO_HASH, 0x0100_3456, &params));
    // overflow
    assert!(!check_proof_of_work(&ZERO_HASH, 0xff12_3456, &params));
    // easier than the limit
    assert!(!check_proof_of_work(&ZERO_HASH, 0x1d01_ffff, &params));
    assert!(!check_proof_of_work(&ZERO_HASH, 0x207f_ffff, &params));
}

#[test]
fn regtest_accepts_its_own_limit() {
    let params = ConsensusParams::regtest();
    assert!(check_proof_of_work(&ZERO_HASH, 0x207f_ffff, &params));
    assert!(!check_proof_of_work(&MAX_HASH, 0x207f_ffff, &params));
}

#[test]
fn genesis_headers_meet_their_bits() {
    for params in [NetworkParams::main(), NetworkParams::regtest()] {
        assert!(check_header_proof_of_work(&params.genesis.header, &params.consensus), "{}", params.name());
    }

    // The testnet genesis nonce was never searched against its bits
    let testnet = NetworkParams::testnet();
    assert!(!check_header_proof_of_work(&testnet.genesis.header, &testnet.consensus));
}

#[test]
fn hash_is_compared_as_little_endian_number() {
    let params = ConsensusParams::main();
    // Displayed as 00000000ffff0000...00, exactly the 0x1d00ffff target
    let at_limit = Hash::from_bytes(hex!("0000000000000000000000000000000000000000000000000000ffff00000000"));
    assert!(check_proof_of_work(&at_limit, 0x1d00_ffff, &params));
    assert_eq!(at_limit.to_string(), "00000000ffff0000000000000000000000000000000000000000000000000000");

    let mut bytes = *at_limit.as_bytes();
    bytes[0] = 1;
    assert!(!check_proof_of_work(&Hash::from_bytes(bytes), 0x1d00_ffff, &params));
}
