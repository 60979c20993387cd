//! Boot-time configuration pass against an in-memory controller.

use std::collections::{BTreeMap, VecDeque};

use embassy_tangier::config::{Config, TANGIER_PINCONF_BASE};
use embassy_tangier::family::{Family, BANK_STRIDE, BUF_OFFSET, WORD_SIZE};
use embassy_tangier::mmio::RegisterBus;
use embassy_tangier::node::{PadNode, MODE_FUNC, PAD_OFFSET, PROTECTED};
use embassy_tangier::peripherals::PINCTRL;
use embassy_tangier::scu::{IpcCommand, Scu};
use embassy_tangier::{pinctrl, Error, Pinctrl, Summary};

#[derive(Default)]
struct Regs {
    words: BTreeMap<u32, u32>,
}

impl RegisterBus for Regs {
    fn read32(&mut self, addr: u32) -> u32 {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    fn write32(&mut self, addr: u32, value: u32) {
        self.words.insert(addr, value);
    }
}

/// SCU replaying scripted statuses, zero once the script runs out.
#[derive(Default)]
struct ScriptedScu {
    statuses: VecDeque<i32>,
    log: Vec<(u8, u32, u32)>,
}

impl Scu for ScriptedScu {
    fn raw_command(&mut self, cmd: IpcCommand, addr: u32, value: u32) -> i32 {
        self.log.push((cmd.into(), addr, value));
        self.statuses.pop_front().unwrap_or(0)
    }
}

/// Devicetree-like node: property name to value, booleans as present keys.
struct Node(Vec<(&'static str, u32)>);

impl Node {
    fn pad(pad: u32, mode: u32) -> Self {
        Node(vec![(PAD_OFFSET, pad), (MODE_FUNC, mode)])
    }

    fn protected(mut self) -> Self {
        self.0.push((PROTECTED, 0));
        self
    }
}

impl PadNode for Node {
    fn read_u32(&self, name: &str) -> Option<u32> {
        self.0.iter().find(|(key, _)| *key == name).map(|(_, v)| *v)
    }

    fn read_bool(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| *key == name)
    }
}

fn bufcfg(family: u32, bufno: u32) -> u32 {
    TANGIER_PINCONF_BASE + family * BANK_STRIDE + BUF_OFFSET + bufno * WORD_SIZE
}

fn peripheral() -> PINCTRL {
    // SAFETY: each test binds its own controller over private fakes
    unsafe { PINCTRL::steal() }
}

#[test]
fn probe_configures_every_valid_pad() {
    let mut regs = Regs::default();
    regs.words.insert(bufcfg(3, 0), 0x0001_2005);
    regs.words.insert(bufcfg(3, 19), 0xffff_fff8);
    let mut scu = ScriptedScu::default();

    let nodes = vec![Node::pad(37, 6), Node::pad(56, 7), Node::pad(101, 1).protected()];
    let summary = pinctrl::probe(peripheral(), Config::default(), nodes, &mut regs, &mut scu).unwrap();

    assert_eq!(
        summary,
        Summary {
            configured: 3,
            failed: 0
        }
    );
    assert_eq!(regs.words[&bufcfg(3, 0)], 0x0001_2006);
    assert_eq!(regs.words[&bufcfg(3, 19)], 0xffff_ffff);
    assert_eq!(scu.log, [(0x05, bufcfg(7, 0), 0x1)]);
}

#[test]
fn failures_do_not_stop_the_pass() {
    let mut regs = Regs::default();
    let mut scu = ScriptedScu {
        statuses: VecDeque::from([-5]),
        ..Default::default()
    };

    let nodes = vec![
        // SCU refuses the first protected write.
        Node::pad(101, 2).protected(),
        // Uncovered pad.
        Node::pad(200, 1),
        // Mode outside the function field.
        Node::pad(40, 8),
        // Missing mode-func.
        Node(vec![(PAD_OFFSET, 41)]),
        // Missing pad-offset.
        Node(vec![(MODE_FUNC, 1)]),
        Node::pad(102, 3).protected(),
        Node::pad(42, 2),
    ];
    let summary = pinctrl::probe(peripheral(), Config::default(), nodes, &mut regs, &mut scu).unwrap();

    assert_eq!(
        summary,
        Summary {
            configured: 2,
            failed: 5
        }
    );
    assert_eq!(regs.words.len(), 1);
    assert_eq!(regs.words[&bufcfg(3, 5)], 2);
    assert_eq!(
        scu.log,
        [(0x05, bufcfg(7, 0), 2), (0x05, bufcfg(7, 1), 3)]
    );
}

#[test]
fn per_pad_errors_are_distinct() {
    let mut regs = Regs::default();
    let mut scu = ScriptedScu {
        statuses: VecDeque::from([1]),
        ..Default::default()
    };
    let mut p = Pinctrl::new(peripheral(), Config::default(), &mut regs, &mut scu).unwrap();

    assert_eq!(p.configure_pad(101, 1, true), Err(Error::SecureWriteFailed(1)));
    assert_eq!(p.configure_pad(101, 1, true), Ok(()));
    assert_eq!(p.configure_pad(200, 1, false), Err(Error::UnknownPad(200)));
    assert_eq!(p.configure_pad(37, 0x10, false), Err(Error::UnsupportedMode(0x10)));
}

#[test]
fn protected_write_reads_current_word_first() {
    let mut regs = Regs::default();
    regs.words.insert(bufcfg(7, 13), 0x00c0_0107);
    let mut scu = ScriptedScu::default();

    let mut p = Pinctrl::new(peripheral(), Config::default(), &mut regs, &mut scu).unwrap();
    p.configure_pad(114, 0, true).unwrap();
    drop(p);

    // The SCU performs the write; the host copy is untouched.
    assert_eq!(regs.words[&bufcfg(7, 13)], 0x00c0_0107);
    assert_eq!(scu.log, [(0x05, bufcfg(7, 13), 0x00c0_0100)]);
}

#[test]
fn bad_family_table_fails_before_any_pad() {
    let mut regs = Regs::default();
    let mut scu = ScriptedScu::default();

    // Family 7 claims pads already owned by family 3.
    let families = [Family::new(3, 37, 56), Family::new(7, 50, 60)];
    let nodes = vec![Node::pad(37, 1), Node::pad(55, 2).protected()];
    let ret = pinctrl::probe(peripheral(), Config::new(TANGIER_PINCONF_BASE, &families), nodes, &mut regs, &mut scu);

    assert_eq!(ret, Err(Error::InvalidFamily(7)));
    assert!(regs.words.is_empty());
    assert!(scu.log.is_empty());
}
