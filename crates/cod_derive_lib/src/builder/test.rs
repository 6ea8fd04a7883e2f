use syn::{DeriveInput, parse_quote};

use super::*;
use crate::wire::WireType;

fn build(input: &DeriveInput) -> syn::Result<StructData> {
    build_struct_data(input, Directive::None)
}

fn error_of(input: &DeriveInput) -> String {
    build(input).unwrap_err().to_string()
}

#[test]
fn record_fields_in_declaration_order() {
    let input: DeriveInput = parse_quote! {
        struct Person {
            name: String,
            age: u8,
            tags: Vec<u32>,
        }
    };
    let data = build(&input).unwrap();

    assert_eq!(data.directive, Directive::Struct);
    let names: Vec<&str> =
        data.fields.iter().map(|record| record.field.name()).collect();
    assert_eq!(names, ["self.name", "self.age", "self.tags"]);

    let kinds: Vec<&str> =
        data.fields.iter().map(|record| record.field.kind()).collect();
    assert_eq!(kinds, ["primitive", "primitive", "slice"]);
}

#[test]
fn nested_depths() {
    let ty: Type = parse_quote!(Vec<HashMap<String, Vec<u8>>>);
    let mut field = build_field(&ty, 0).unwrap();
    field.set_name("self.table".to_owned());

    let Field::Slice(slice) = &field else { panic!("expected slice") };
    assert_eq!(slice.depth, 0);
    assert_eq!(slice.inner.name(), "self.table[i0]");

    let Field::Map(map) = slice.inner.as_ref() else { panic!("expected map") };
    assert_eq!(map.depth, 1);
    assert_eq!(map.key.kind(), "primitive");
    assert_eq!(map.value.name(), "self.table[i0][key1]");

    let Field::Slice(bytes) = map.value.as_ref() else {
        panic!("expected slice")
    };
    assert_eq!(bytes.depth, 2);
    let Field::Basic(byte) = bytes.inner.as_ref() else {
        panic!("expected basic")
    };
    assert!(byte.is_byte());
}

#[test]
fn option_is_pointer_and_unknown_paths_delegate() {
    let ty: Type = parse_quote!(Option<Box<Person>>);
    let field = build_field(&ty, 3).unwrap();

    let Field::Pointer(pointer) = &field else { panic!("expected pointer") };
    assert_eq!(pointer.depth, 3);
    assert_eq!(pointer.inner.kind(), "delegate");
}

#[test]
fn paths_resolve_by_last_segment() {
    let ty: Type = parse_quote!(std::collections::BTreeMap<u32, ::std::string::String>);
    let Field::Map(map) = build_field(&ty, 0).unwrap() else {
        panic!("expected map")
    };
    let Field::Basic(value) = map.value.as_ref() else {
        panic!("expected basic")
    };
    assert_eq!(value.wire, Some(WireType::Str));

    let ty: Type = parse_quote!((u64));
    let Field::Basic(basic) = build_field(&ty, 0).unwrap() else {
        panic!("expected basic")
    };
    assert_eq!(basic.wire, Some(WireType::VarU64));
}

#[test]
fn single_field_tuple_struct_is_alias() {
    let input: DeriveInput = parse_quote! {
        struct SpecialMap(HashMap<String, Vec<u8>>);
    };
    let data = build(&input).unwrap();

    assert_eq!(data.fields.len(), 1);
    let Field::Alias(alias) = &data.fields[0].field else {
        panic!("expected alias")
    };
    assert_eq!(alias.alias, "SpecialMap");
    assert_eq!(alias.depth, 0);
    assert_eq!(alias.inner.name(), "self.0");

    let Field::Map(map) = alias.inner.as_ref() else { panic!("expected map") };
    assert_eq!(map.depth, 1);
}

#[test]
fn multi_field_tuple_struct_is_record() {
    let input: DeriveInput = parse_quote! {
        struct Pair(u32, String);
    };
    let data = build(&input).unwrap();

    let names: Vec<&str> =
        data.fields.iter().map(|record| record.field.name()).collect();
    assert_eq!(names, ["self.0", "self.1"]);
}

#[test]
fn unit_struct_is_blank() {
    let input: DeriveInput = parse_quote! {
        struct Marker;
    };
    assert!(build(&input).unwrap().is_blank());
}

#[test]
fn modifiers_propagate_to_nested_fields() {
    let input: DeriveInput = parse_quote! {
        struct Blocked {
            #[cod(cast = "fixed_u32", skip = "equality")]
            ids: Vec<Option<u16>>,
        }
    };
    let data = build(&input).unwrap();
    let field = &data.fields[0].field;

    assert!(field.modifiers().skip.equality);

    let Field::Slice(slice) = field else { panic!("expected slice") };
    let Field::Pointer(pointer) = slice.inner.as_ref() else {
        panic!("expected pointer")
    };
    let Field::Basic(leaf) = pointer.inner.as_ref() else {
        panic!("expected basic")
    };
    assert_eq!(leaf.modifiers.cast, Some(WireType::FixedU32));
    assert_eq!(leaf.encoded_wire_type(), Some(WireType::FixedU32));
}

#[test]
fn rejects_cast_on_string() {
    let input: DeriveInput = parse_quote! {
        struct Named {
            #[cod(cast = "u64")]
            name: String,
        }
    };
    assert!(error_of(&input).contains("cannot be cast"));
}

#[test]
fn rejects_unsupported_shapes() {
    let cases: Vec<(DeriveInput, &str)> = vec![
        (
            parse_quote!(struct A { f: fn(u32) -> u32 }),
            "function types",
        ),
        (parse_quote!(struct A { f: &'static str }), "references"),
        (parse_quote!(struct A { f: *const u8 }), "references"),
        (parse_quote!(struct A { f: (u32, u32) }), "tuple types"),
        (parse_quote!(struct A { f: dyn Fn() }), "trait object"),
        (parse_quote!(struct A { f: Vec<dyn Send> }), "trait object"),
        (parse_quote!(struct A { f: Option<[u8]> }), "unsized slices"),
        (
            parse_quote!(struct A { f: <B as Trait>::Output }),
            "qualified associated types",
        ),
    ];

    for (input, expected) in cases {
        let message = error_of(&input);
        assert!(
            message.contains(expected),
            "expected `{expected}` in `{message}`"
        );
    }
}

#[test]
fn rejects_generic_items() {
    let input: DeriveInput = parse_quote! {
        struct Wrapper<T> { value: T }
    };
    assert!(error_of(&input).contains("generic parameters"));

    let input: DeriveInput = parse_quote! {
        struct Borrowed<'a> { value: &'a str }
    };
    assert!(error_of(&input).contains("generic parameters"));
}

#[test]
fn rejects_plain_enums_and_unions() {
    let input: DeriveInput = parse_quote! {
        enum Color { Red, Green }
    };
    assert!(error_of(&input).contains("union definitions"));

    let input: DeriveInput = parse_quote! {
        union Bits { a: u32, b: f32 }
    };
    assert!(error_of(&input).contains("Rust unions"));
}

#[test]
fn rejects_def_on_struct() {
    let input: DeriveInput = parse_quote! {
        struct ShapeDef { square: u32 }
    };
    let err = build_struct_data(&input, Directive::UnionDef).unwrap_err();
    assert!(err.to_string().contains("must be placed on an enum"));
}

#[test]
fn union_holder_matches_definition() {
    let input: DeriveInput = parse_quote! {
        struct Shape(Option<shapes::ShapeDef>);
    };
    let data =
        build_struct_data(&input, Directive::Union(parse_quote!(ShapeDef)))
            .unwrap();

    assert_eq!(data.directive, Directive::Union(parse_quote!(ShapeDef)));
    assert_eq!(data.fields[0].field.kind(), "pointer");
}

#[test]
fn rejects_mismatched_union_holder() {
    let def: Path = parse_quote!(ShapeDef);

    let inputs: Vec<DeriveInput> = vec![
        parse_quote!(struct Shape(Option<OtherDef>);),
        parse_quote!(struct Shape(ShapeDef);),
        parse_quote!(struct Shape { value: Option<u32> }),
    ];
    for input in inputs {
        let err =
            build_struct_data(&input, Directive::Union(def.clone()))
                .unwrap_err();
        assert!(
            err.to_string().contains("Option<ShapeDef>"),
            "unexpected error: {err}"
        );
    }

    let input: DeriveInput = parse_quote! {
        struct Shape { a: Option<ShapeDef>, b: Option<ShapeDef> }
    };
    let err = build_struct_data(&input, Directive::Union(def)).unwrap_err();
    assert!(err.to_string().contains("exactly one field"));
}
