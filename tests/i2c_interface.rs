mod common;

use crate::common::*;
use embedded_hal::i2c::ErrorKind;
use lis3dh_stream::interface::i2c::I2cInterface;
use lis3dh_stream::interface::Lis3dhInterface;
use lis3dh_stream::registers::ALTERNATE_ADDRESS;

fn probe_sweep(responders: &[u8]) -> Vec<I2cTrans> {
    (0..0x80u8)
        .map(|address| {
            let trans = I2cTrans::write(address, vec![]);
            if responders.contains(&address) {
                trans
            } else {
                trans.with_error(ErrorKind::Other)
            }
        })
        .collect()
}

#[test]
fn single_register_read_has_no_increment_bit() {
    let expectations = [trans_read(0x0F, 0x33)];
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new_default(i2c.clone());

    assert_eq!(interface.address(), DEV_ADDR);
    assert_eq!(interface.read_register(0x0F).unwrap(), 0x33);
    i2c.done();
}

#[test]
fn burst_read_sets_increment_bit() {
    let expectations = [trans_axis(0x28, 0xAA, 0x55)];
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    let mut buf = [0u8; 2];
    interface.read_many(0x28, &mut buf).unwrap();
    assert_eq!(buf, [0xAA, 0x55]);
    i2c.done();
}

#[test]
fn burst_write_prefixes_sub_address() {
    let expectations = [
        I2cTrans::write(DEV_ADDR, vec![0xA0, 0x57, 0x00, 0x00, 0x98]),
        trans_write(0x20, 0x57),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    interface.write_many(0x20, &[0x57, 0x00, 0x00, 0x98]).unwrap();
    interface.write_many(0x20, &[0x57]).unwrap();
    i2c.done();
}

#[test]
fn burst_write_splits_long_payloads() {
    let payload: Vec<u8> = (1..=10).collect();
    let expectations = [
        I2cTrans::write(DEV_ADDR, [0xA0].into_iter().chain(1..=8).collect()),
        I2cTrans::write(DEV_ADDR, vec![0xA8, 9, 10]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    interface.write_many(0x20, &payload).unwrap();
    i2c.done();
}

#[test]
fn burst_write_sub_address_wraps_past_last_register() {
    let payload: Vec<u8> = (1..=10).collect();
    let expectations = [
        I2cTrans::write(DEV_ADDR, [0xF8].into_iter().chain(1..=8).collect()),
        I2cTrans::write(DEV_ADDR, vec![0x80, 9, 10]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    interface.write_many(0xF8, &payload).unwrap();
    i2c.done();
}

#[test]
fn alternate_address_targets_sa0_high() {
    let expectations = [I2cTrans::write_read(ALTERNATE_ADDRESS, vec![0x0F], vec![0x33])];
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), ALTERNATE_ADDRESS);

    assert_eq!(interface.address(), 0x19);
    assert_eq!(interface.read_register(0x0F).unwrap(), 0x33);
    i2c.done();
}

#[test]
fn empty_transfers_touch_nothing() {
    let mut i2c = I2cMock::new(&[]);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    interface.read_many(0x28, &mut []).unwrap();
    interface.write_many(0x20, &[]).unwrap();
    i2c.done();
}

#[test]
fn scan_records_responders() {
    let expectations = probe_sweep(&[0x18, 0x3C]);
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    let mut found = [0u8; 4];
    let count = interface.scan(&mut found);

    assert_eq!(count, 2);
    assert_eq!(&found[..count], &[0x18, 0x3C]);
    i2c.done();
}

#[test]
fn scan_counts_past_a_short_buffer() {
    let expectations = probe_sweep(&[0x18, 0x19, 0x3C]);
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    let mut found = [0u8; 1];
    assert_eq!(interface.scan(&mut found), 3);
    assert_eq!(found, [0x18]);
    i2c.done();
}

#[test]
fn probe_reports_acknowledge() {
    let expectations = [
        I2cTrans::write(0x18, vec![]),
        I2cTrans::write(0x19, vec![]).with_error(ErrorKind::Other),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c.clone(), DEV_ADDR);

    assert!(interface.probe(0x18));
    assert!(!interface.probe(0x19));
    i2c.done();
}
