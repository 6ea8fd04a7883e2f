//! Round-trip, equality and truncation tests over a record that uses every
//! supported shape.

#![allow(missing_docs)]

use std::collections::{BTreeMap, HashMap};

use cod::{Cod, CodEquals, Decode, Error};

#[derive(Debug, Clone, Default, PartialEq, Cod)]
pub struct Id {
    pub val: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Cod)]
pub struct SpecialMap(pub HashMap<String, Vec<u8>>);

#[derive(Debug, Clone, Default, PartialEq, Cod)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, PartialEq, Cod)]
#[cod(def)]
pub enum MyUnionDef {
    Id(Id),
    SpecialMap(SpecialMap),
    Vec(Vec3),
}

#[derive(Debug, Clone, Default, PartialEq, Cod)]
#[cod(union = MyUnionDef)]
pub struct MyUnion(Option<MyUnionDef>);

#[derive(Debug, Clone, Default, PartialEq, Cod)]
pub struct BlockedStruct {
    #[cod(cast = "u64")]
    pub blocked: u32,
    pub flag: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Cod)]
pub struct Person {
    pub name: String,
    pub age: u8,
    pub id: Id,
    pub array: [u16; 2],
    pub slice: Vec<u32>,
    pub double_slice: Vec<Vec<u8>>,
    pub map: HashMap<String, Vec<u64>>,
    pub multi_map: HashMap<String, BTreeMap<u32, Vec<i64>>>,
    pub my_union: MyUnion,
    pub pointer: Option<BlockedStruct>,
}

fn populated() -> Person {
    Person {
        name: "Ada".to_owned(),
        age: 36,
        id: Id { val: 1815 },
        array: [7, 300],
        slice: vec![0, 127, 128, u32::MAX],
        double_slice: vec![vec![1, 2, 3], vec![], vec![255]],
        map: HashMap::from([
            ("primes".to_owned(), vec![2, 3, 5, 7]),
            ("empty".to_owned(), vec![]),
        ]),
        multi_map: HashMap::from([(
            "outer".to_owned(),
            BTreeMap::from([(1, vec![-1, 1]), (2, vec![i64::MIN])]),
        )]),
        my_union: MyUnion::new(Vec3 { x: 1.0, y: -2.5, z: 0.0 }),
        pointer: Some(BlockedStruct { blocked: 9000, flag: true }),
    }
}

fn roundtrip(person: &Person) -> Person {
    let bs = cod::encode(person);
    let (decoded, n) = cod::decode::<Person>(&bs).unwrap();
    assert_eq!(n, bs.len(), "decode must consume the whole encoding");
    decoded
}

#[test]
fn populated_roundtrip() {
    let person = populated();
    let decoded = roundtrip(&person);

    assert!(decoded.cod_equals(&person));
    assert_eq!(decoded, person);
}

#[test]
fn default_roundtrip() {
    let person = Person::default();
    let decoded = roundtrip(&person);

    assert!(decoded.cod_equals(&person));
    assert_eq!(decoded, person);
}

#[test]
fn decode_overwrites_receiver() {
    let bs = cod::encode(&Person::default());

    let mut receiver = populated();
    let n = receiver.decode_cod(&bs).unwrap();

    assert_eq!(n, bs.len());
    assert_eq!(receiver, Person::default());
}

#[test]
fn trailing_bytes_are_not_consumed() {
    let person = populated();
    let mut bs = cod::encode(&person);
    let len = bs.len();
    bs.extend_from_slice(&[0xDE, 0xAD]);

    let (decoded, n) = cod::decode::<Person>(&bs).unwrap();
    assert_eq!(n, len);
    assert_eq!(decoded, person);
}

#[test]
fn every_strict_prefix_is_truncated() {
    for person in [populated(), Person::default()] {
        let bs = cod::encode(&person);

        for len in 0..bs.len() {
            assert_eq!(
                cod::decode::<Person>(&bs[..len]).err(),
                Some(Error::TruncatedData),
                "prefix of {len} bytes out of {}",
                bs.len()
            );
        }
    }
}

#[test]
fn cod_equals_is_reflexive() {
    let person = populated();
    assert!(person.cod_equals(&person.clone()));
    assert!(Person::default().cod_equals(&Person::default()));
}

#[test]
fn single_field_mutation_breaks_equality() {
    let mutations: &[(&str, fn(&mut Person))] = &[
        ("name", |p| p.name.push('!')),
        ("age", |p| p.age += 1),
        ("id", |p| p.id.val += 1),
        ("array", |p| p.array[1] += 1),
        ("slice element", |p| p.slice[0] += 1),
        ("slice length", |p| p.slice.push(1)),
        ("double slice", |p| p.double_slice[0][0] ^= 1),
        ("double slice length", |p| {
            p.double_slice.pop();
        }),
        ("map value", |p| {
            p.map.get_mut("primes").unwrap().push(11);
        }),
        ("map key", |p| {
            let value = p.map.remove("empty").unwrap();
            p.map.insert("vacant".to_owned(), value);
        }),
        ("multi map", |p| {
            p.multi_map.get_mut("outer").unwrap().get_mut(&2).unwrap()[0] = 0;
        }),
        ("union member value", |p| {
            p.my_union.set(Vec3 { x: 1.0, y: -2.5, z: 0.5 });
        }),
        ("union member type", |p| p.my_union.set(Id { val: 1 })),
        ("union emptied", |p| p.my_union = MyUnion::default()),
        ("pointer value", |p| {
            p.pointer.as_mut().unwrap().flag = false;
        }),
        ("pointer absent", |p| p.pointer = None),
    ];

    let original = populated();
    for &(what, mutate) in mutations {
        let mut changed = original.clone();
        mutate(&mut changed);

        assert!(!changed.cod_equals(&original), "mutating {what} went unnoticed");
        assert!(!original.cod_equals(&changed), "mutating {what} went unnoticed");
    }
}

#[test]
fn cast_field_is_widened_on_the_wire() {
    let blocked = BlockedStruct { blocked: 300, flag: true };
    let bs = cod::encode(&blocked);

    // var_u64(300) followed by the bool byte
    assert_eq!(bs, [0xAC, 0x02, 1]);

    let (decoded, _) = cod::decode::<BlockedStruct>(&bs).unwrap();
    assert_eq!(decoded, blocked);
}

#[test]
fn cast_field_narrows_with_as() {
    let mut bs = Vec::new();
    cod::backend::write_var_u64(&mut bs, u64::from(u32::MAX) + 1);
    cod::backend::write_bool(&mut bs, false);

    // the wide value decodes, then narrows with `as`
    let (decoded, n) = cod::decode::<BlockedStruct>(&bs).unwrap();
    assert_eq!(n, bs.len());
    assert_eq!(decoded.blocked, 0);
}

#[derive(Debug, Default, PartialEq, Cod)]
struct Record {
    name: String,
    age: u8,
    tags: Vec<u32>,
}

#[test]
fn concrete_record_bytes() {
    let record =
        Record { name: "hello".to_owned(), age: 5, tags: vec![100, 101, 102] };

    let bs = cod::encode(&record);
    assert_eq!(bs, [5, b'h', b'e', b'l', b'l', b'o', 0x05, 3, 100, 101, 102]);

    let (decoded, n) = cod::decode::<Record>(&bs).unwrap();
    assert_eq!(n, bs.len());
    assert!(decoded.cod_equals(&record));
}
