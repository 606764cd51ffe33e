//! Consumer-level tests: concrete policies over every storage strategy,
//! exercised through the public wrapper contract only.

use std::sync::atomic::{AtomicUsize, Ordering as MemOrder};

use static_assertions::assert_eq_size;

use markable::{
    mark::mark_enum, Buffer, CompactBool, Dual, DualMark, Mark, MarkDefault, MarkEmpty, MarkInt,
    MarkNan, Markable, Member,
};

type OptInt = Markable<Member<MarkInt<i32, -1>>>;
type OptIntZero = Markable<Member<MarkInt<i32, 0>>>;
type OptF64 = Markable<Member<MarkNan<f64>>>;

assert_eq_size!(OptInt, i32);
assert_eq_size!(OptF64, f64);
assert_eq_size!(CompactBool, u8);
assert_eq_size!(Markable<Member<MarkEmpty<String>>>, String);
assert_eq_size!(Markable<Member<MarkEmpty<Vec<u8>>>>, Vec<u8>);

#[test]
fn value_ctor() {
    let o_ = OptInt::empty();
    let o_n1 = OptInt::new(-1);
    let o_0 = OptInt::new(0);
    let o_1 = OptInt::new(1);

    assert_eq!(*o_.storage_value(), -1);
    assert!(!o_.has_value());
    assert!(!o_n1.has_value());
    assert!(o_0.has_value());
    assert!(o_1.has_value());

    assert_eq!(*o_0.value(), 0);
    assert_eq!(*o_1.value(), 1);
}

#[test]
fn zero_sentinel() {
    let o_ = OptIntZero::empty();
    let o_n1 = OptIntZero::new(-1);
    let o_0 = OptIntZero::new(0);
    let o_1 = OptIntZero::new(1);

    assert!(!o_.has_value());
    assert!(o_n1.has_value());
    assert!(!o_0.has_value());
    assert!(o_1.has_value());

    assert_eq!(*o_n1.value(), -1);
    assert_eq!(*o_1.value(), 1);
}

/// Two NUL bytes as a string sentinel: a pattern no real name contains.
struct MarkNulNul;

impl Mark for MarkNulNul {
    type Value = String;
    type Storage = String;

    fn marked() -> String {
        "\0\0".to_owned()
    }

    fn is_marked(storage: &String) -> bool {
        storage == "\0\0"
    }

    fn store(value: String) -> String {
        value
    }

    unsafe fn access(storage: &String) -> &String {
        storage
    }

    unsafe fn access_mut(storage: &mut String) -> &mut String {
        storage
    }

    unsafe fn unstore(storage: String) -> String {
        storage
    }
}

#[test]
fn string_sentinel() {
    type OptStr = Markable<Member<MarkNulNul>>;
    assert_eq_size!(OptStr, String);

    let o_ = OptStr::empty();
    let o_nn = OptStr::new("\0\0".to_owned());
    let o_0 = OptStr::new("\0".to_owned());
    let o_a = OptStr::new("A".to_owned());

    assert!(!o_.has_value());
    assert!(!o_nn.has_value());
    assert!(o_0.has_value());
    assert!(o_a.has_value());
}

/// Storage wider than the value: a (present, name) pair where the flag is
/// the representation and only the name is the payload.
struct MarkFirstEmpty;

impl Mark for MarkFirstEmpty {
    type Value = String;
    type Storage = (bool, String);

    fn marked() -> (bool, String) {
        (false, String::new())
    }

    fn is_marked(storage: &(bool, String)) -> bool {
        !storage.0
    }

    fn store(value: String) -> (bool, String) {
        (true, value)
    }

    unsafe fn access(storage: &(bool, String)) -> &String {
        &storage.1
    }

    unsafe fn access_mut(storage: &mut (bool, String)) -> &mut String {
        &mut storage.1
    }

    unsafe fn unstore(storage: (bool, String)) -> String {
        storage.1
    }
}

#[test]
fn custom_pair_storage() {
    type OptStr = Markable<Member<MarkFirstEmpty>>;

    let mut o_ = OptStr::empty();
    let mut o_0 = OptStr::new(String::new());
    let o_a = OptStr::new("A".to_owned());

    assert!(!o_.has_value());

    assert!(o_0.has_value());
    assert_eq!(*o_0.value(), "");

    assert!(o_a.has_value());
    assert_eq!(*o_a.value(), "A");

    o_.swap(&mut o_0);
    assert!(o_.has_value());
    assert_eq!(*o_.value(), "");
    assert!(!o_0.has_value());
}

#[test]
fn bool_storage() {
    let o_ = CompactBool::empty();
    let o_t = CompactBool::new(true);
    let o_f = CompactBool::new(false);

    assert!(!o_.has_value());

    assert!(o_t.has_value());
    assert_eq!(*o_t.value(), true);

    assert!(o_f.has_value());
    assert_eq!(*o_f.value(), false);

    assert_eq!(*o_.storage_value(), 2);
    assert_eq!(*o_t.storage_value(), 1);
    assert_eq!(*o_f.storage_value(), 0);
}

#[test]
fn storage_value() {
    let o_ = OptInt::empty();
    let o_n1 = OptInt::new(-1);
    let o_0 = OptInt::new(0);
    let o_1 = OptInt::new(1);

    assert_eq!(*o_.storage_value(), -1);
    assert_eq!(*o_n1.storage_value(), -1);
    assert_eq!(*o_0.storage_value(), 0);
    assert_eq!(*o_1.storage_value(), 1);
}

#[test]
fn nan_sentinel() {
    let o_ = OptF64::empty();
    let o_1 = OptF64::new(1.0);
    let o_nan = OptF64::new(0.0 / 0.0);

    assert!(!o_.has_value());
    assert!(o_1.has_value());
    assert!(!o_nan.has_value());

    assert_eq!(*o_1.value(), 1.0);

    assert!(o_.storage_value().is_nan());
    assert_eq!(*o_1.storage_value(), 1.0);
    assert!(o_nan.storage_value().is_nan());
}

#[test]
fn value_init_sentinel() {
    {
        type Opt = Markable<Member<MarkDefault<i32>>>;

        let o_ = Opt::empty();
        let o_1 = Opt::new(1);
        let o_e = Opt::new(0);

        assert!(!o_.has_value());
        assert!(o_1.has_value());
        assert!(!o_e.has_value());

        assert_eq!(*o_1.value(), 1);

        assert_eq!(*o_.storage_value(), 0);
        assert_eq!(*o_1.storage_value(), 1);
        assert_eq!(*o_e.storage_value(), 0);
    }
    {
        type Opt = Markable<Member<MarkDefault<String>>>;

        let o_ = Opt::empty();
        let o_1 = Opt::new("one".to_owned());
        let o_e = Opt::new(String::new());

        assert!(!o_.has_value());
        assert!(o_1.has_value());
        assert!(!o_e.has_value());

        assert_eq!(*o_1.value(), "one");

        assert_eq!(*o_.storage_value(), "");
        assert_eq!(*o_1.storage_value(), "one");
        assert_eq!(*o_e.storage_value(), "");
    }
}

#[test]
fn stl_empty_sentinel() {
    type Opt = Markable<Member<MarkEmpty<Vec<u8>>>>;

    let o_ = Opt::empty();
    let o_1 = Opt::new(vec![1]);
    let o_e = Opt::new(Vec::new());

    assert!(!o_.has_value());
    assert!(o_1.has_value());
    assert!(!o_e.has_value());

    assert_eq!(*o_1.value(), [1]);
    assert_eq!(*o_.storage_value(), Vec::<u8>::new());
}

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Debug)]
enum Dir {
    N,
    E,
    S,
    W,
}

mark_enum! {
    /// -1 is not a Dir discriminant.
    struct MarkDir: Dir as i8 = -1;
}

assert_eq_size!(Markable<Buffer<MarkDir>>, Dir);

#[test]
fn enum_compaction() {
    type OptDir = Markable<Buffer<MarkDir>>;

    let o_ = OptDir::empty();
    let o_n = OptDir::new(Dir::N);
    let o_w = OptDir::new(Dir::W);

    assert!(!o_.has_value());
    assert!(o_n.has_value());
    assert!(o_w.has_value());

    assert_eq!(*o_n.value(), Dir::N);
    assert_eq!(*o_w.value(), Dir::W);

    assert_eq!(*o_.storage_value(), -1);
    assert_eq!(*o_n.storage_value(), 0);
    assert_eq!(*o_w.storage_value(), 3);
}

static MINUTES_CREATED: AtomicUsize = AtomicUsize::new(0);
static MINUTES_DESTROYED: AtomicUsize = AtomicUsize::new(0);

/// A bounded value type whose invariant (0..1440) leaves -1 free.
#[repr(C)]
#[derive(Debug)]
struct Minutes {
    m: i32,
}

impl Minutes {
    fn new(m: i32) -> Self {
        assert!((0..24 * 60).contains(&m));
        MINUTES_CREATED.fetch_add(1, MemOrder::SeqCst);
        Minutes { m }
    }

    fn as_int(&self) -> i32 {
        self.m
    }
}

impl Clone for Minutes {
    fn clone(&self) -> Self {
        MINUTES_CREATED.fetch_add(1, MemOrder::SeqCst);
        Minutes { m: self.m }
    }
}

impl PartialEq for Minutes {
    fn eq(&self, other: &Self) -> bool {
        self.m == other.m
    }
}

impl Drop for Minutes {
    fn drop(&mut self) {
        MINUTES_DESTROYED.fetch_add(1, MemOrder::SeqCst);
    }
}

/// The representation shares only the layout, none of the invariants.
#[repr(C)]
struct RawMinutes {
    m: i32,
}

struct MarkMinutes;

unsafe impl DualMark for MarkMinutes {
    type Value = Minutes;
    type Repr = RawMinutes;

    fn marked() -> RawMinutes {
        RawMinutes { m: -1 }
    }

    fn is_marked(repr: &RawMinutes) -> bool {
        repr.m == -1
    }
}

assert_eq_size!(Markable<Dual<MarkMinutes>>, Minutes);

#[test]
fn dual_storage_minutes() {
    type OptTime = Markable<Dual<MarkMinutes>>;

    let created = || MINUTES_CREATED.load(MemOrder::SeqCst);
    let destroyed = || MINUTES_DESTROYED.load(MemOrder::SeqCst);
    let base_created = created();
    let base_destroyed = destroyed();

    {
        let t0 = Minutes::new(0);
        let tm = Minutes::new(1439);

        let mut o_ = OptTime::empty();
        let o_0 = OptTime::new(t0.clone());
        let mut o_m = OptTime::new(tm.clone());

        assert!(!o_.has_value());
        assert!(o_0.has_value());
        assert!(o_m.has_value());
        assert_eq!(created() - base_created, 4);

        assert_eq!(*o_0.value(), t0);
        assert_eq!(*o_m.value(), tm);
        assert_eq!(o_.storage_value().m, -1);
        assert_eq!(o_m.storage_value().m, 1439);

        let o_m2 = o_m.clone();
        assert!(o_m.has_value());
        assert_eq!(*o_m2.value(), tm);
        assert_eq!(created() - base_created, 5);

        o_.clone_from(&o_m2);
        assert!(o_.has_value());
        assert_eq!(o_.value().as_int(), 1439);
        assert_eq!(created() - base_created, 6);
        assert_eq!(destroyed() - base_destroyed, 0);

        o_.clear();
        assert!(!o_.has_value());
        assert!(o_m.has_value());
        assert_eq!(created() - base_created, 6);
        assert_eq!(destroyed() - base_destroyed, 1);

        // Swap is a bitwise storage exchange: occupancy moves over with
        // zero construction or destruction traffic.
        o_.swap(&mut o_m);
        assert!(o_.has_value());
        assert!(!o_m.has_value());
        assert_eq!(o_.value().as_int(), 1439);
        assert_eq!(created() - base_created, 6);
        assert_eq!(destroyed() - base_destroyed, 1);
    }

    assert_eq!(created() - base_created, destroyed() - base_destroyed);
}

#[test]
fn swap_law() {
    let mut a = OptInt::new(1);
    let mut b = OptInt::new(2);
    a.swap(&mut b);
    assert_eq!(*a.value(), 2);
    assert_eq!(*b.value(), 1);

    let mut occupied = OptInt::new(3);
    let mut empty = OptInt::empty();
    occupied.swap(&mut empty);
    assert!(!occupied.has_value());
    assert_eq!(*empty.value(), 3);
}

#[test]
fn assignment_exhaustiveness() {
    let empty = OptInt::empty();
    let occupied = OptInt::new(9);

    // empty := empty
    let mut target = OptInt::empty();
    target.clone_from(&empty);
    assert!(!target.has_value());

    // empty := occupied
    target.clone_from(&occupied);
    assert_eq!(*target.value(), 9);

    // occupied := occupied
    let mut target = OptInt::new(1);
    target.clone_from(&occupied);
    assert_eq!(*target.value(), 9);

    // occupied := empty
    target.clone_from(&empty);
    assert!(!target.has_value());
}

#[test]
fn round_trip() {
    for v in [i32::MIN, -2, 0, 1, i32::MAX] {
        let o = OptInt::try_new(v).unwrap();
        assert!(o.has_value());
        assert_eq!(*o.value(), v);
    }
    assert!(OptInt::try_new(-1).is_err());
}
