use quote::ToTokens;
use syn::{DeriveInput, parse_quote};
use tracing_test::traced_test;

use super::*;

fn expand(input: &DeriveInput) -> syn::File {
    syn::parse2(derive_cod(input).unwrap()).unwrap()
}

/// The rendered body of the impl of `trait_name` in `file`.
fn impl_of(file: &syn::File, trait_name: &str) -> String {
    file.items
        .iter()
        .find_map(|item| match item {
            syn::Item::Impl(item) => item
                .trait_
                .as_ref()
                .filter(|(_, path, _)| {
                    path.segments
                        .last()
                        .is_some_and(|segment| segment.ident == trait_name)
                })
                .map(|_| item.to_token_stream().to_string()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no impl of `{trait_name}`"))
}

#[test]
fn person_uses_default_wire_types() {
    let input: DeriveInput = parse_quote! {
        struct Person {
            name: String,
            age: u8,
            tags: Vec<u32>,
        }
    };
    let file = expand(&input);

    let encode = impl_of(&file, "Encode");
    assert!(encode.contains("write_string"));
    assert!(encode.contains("write_u8"));
    assert!(encode.contains("write_var_u64"));
    assert!(encode.contains("write_var_u32"));

    let decode = impl_of(&file, "Decode");
    assert!(decode.contains("read_string"));
    assert!(decode.contains("read_var_u32"));
    assert!(decode.contains("clear"));

    let equality = impl_of(&file, "CodEquals");
    assert!(equality.contains("other . tags . len ()"));
}

#[test]
fn nested_locals_carry_their_depth() {
    let input: DeriveInput = parse_quote! {
        struct Grid {
            rows: Vec<Vec<u32>>,
            index: HashMap<String, Vec<Option<u64>>>,
        }
    };
    let file = expand(&input);

    let decode = impl_of(&file, "Decode");
    for local in ["length0", "value0", "length1", "value1", "key0", "val0"] {
        assert!(decode.contains(local), "missing `{local}` in decode");
    }

    let encode = impl_of(&file, "Encode");
    for local in ["i0", "i1", "k0", "v0", "value2"] {
        assert!(encode.contains(local), "missing `{local}` in encode");
    }

    let equality = impl_of(&file, "CodEquals");
    for local in ["lhs0", "rhs0", "lhs2", "rhs2"] {
        assert!(equality.contains(local), "missing `{local}` in equality");
    }
}

#[test]
fn skipped_fields_leave_their_procedures() {
    let input: DeriveInput = parse_quote! {
        struct Cached {
            id: u32,
            #[cod(skip = "serdes")]
            scratch: Vec<u8>,
            #[cod(skip = "equality")]
            stamp: u64,
        }
    };
    let file = expand(&input);

    let encode = impl_of(&file, "Encode");
    assert!(!encode.contains("scratch"));
    assert!(encode.contains("stamp"));

    let decode = impl_of(&file, "Decode");
    assert!(!decode.contains("scratch"));

    let equality = impl_of(&file, "CodEquals");
    assert!(equality.contains("scratch"));
    assert!(!equality.contains("stamp"));
}

#[test]
fn casts_convert_both_ways() {
    let input: DeriveInput = parse_quote! {
        struct Blocked {
            #[cod(cast = "fixed_u64")]
            id: u16,
            #[cod(cast = "u32")]
            level: Level,
        }
    };
    let file = expand(&input);

    let encode = impl_of(&file, "Encode");
    assert!(encode.contains("write_u64 (bs , self . id as u64)"));
    assert!(encode.contains("write_var_u32"));
    assert!(encode.contains(":: core :: convert :: From :: from"));

    let decode = impl_of(&file, "Decode");
    assert!(decode.contains("read_u64"));
    assert!(decode.contains("decoded as u16"));
}

#[test]
fn byte_vectors_use_the_bytes_primitive() {
    let input: DeriveInput = parse_quote! {
        struct Blob {
            data: Vec<u8>,
        }
    };
    let file = expand(&input);

    assert!(impl_of(&file, "Encode").contains("write_bytes"));
    assert!(impl_of(&file, "Decode").contains("read_bytes"));
}

#[test]
fn array_temporaries_are_built_element_wise() {
    let input: DeriveInput = parse_quote! {
        struct Frames {
            frames: Vec<[[u8; 2]; 33]>,
            window: Option<[u16; 40]>,
        }
    };
    let file = expand(&input);

    let decode = impl_of(&file, "Decode");
    assert!(decode.contains(
        "let mut value0 : [[u8 ; 2] ; 33] = :: core :: array :: from_fn (| _ | \
         :: core :: array :: from_fn (| _ | :: core :: default :: Default :: \
         default ()))"
    ));
    assert!(decode.contains(
        "let mut value0 : [u16 ; 40] = :: core :: array :: from_fn"
    ));
}

#[test]
fn lengths_are_checked_against_remaining_input() {
    let input: DeriveInput = parse_quote! {
        struct Lists {
            counts: Vec<u32>,
            markers: Vec<Marker>,
            index: HashMap<Marker, Option<Marker>>,
        }
    };
    let file = expand(&input);

    let decode = impl_of(&file, "Decode");
    let check = "if length0 > (bs . len () - n) as u64";
    assert_eq!(decode.matches(check).count(), 2);
}

#[test]
fn blank_struct_has_degenerate_procedures() {
    let input: DeriveInput = parse_quote! {
        struct Blank {}
    };
    let file = expand(&input);

    assert!(!impl_of(&file, "Encode").contains("write_"));
    assert!(impl_of(&file, "Decode").contains("Ok (0)"));
    assert!(impl_of(&file, "CodEquals").contains("true"));
}

#[test]
fn crate_path_override() {
    let input: DeriveInput = parse_quote! {
        #[cod(struct, crate = "runtime::cod")]
        struct Id {
            value: u64,
        }
    };
    let rendered = derive_cod(&input).unwrap().to_string();

    assert!(rendered.contains("runtime :: cod :: Encode"));
    assert!(!rendered.contains("impl :: cod ::"));
}

#[test]
fn union_definition_dispatch() {
    let input: DeriveInput = parse_quote! {
        #[cod(def)]
        enum ShapeDef {
            Square(Square),
            Label(String),
            Points(Vec<u32>),
        }
    };
    let file = expand(&input);

    let union = impl_of(&file, "UnionDef");
    assert!(union.contains("const SIZE : usize = 4usize"));
    assert!(union.contains("Self :: Square (_) => 1"));
    assert!(union.contains("Self :: Points (_) => 3"));
    assert!(union.contains("UnknownUnionType (tag)"));

    let conversions = file
        .items
        .iter()
        .filter(|item| {
            matches!(item, syn::Item::Impl(item) if item.trait_.as_ref().is_some_and(
                |(_, path, _)| path.segments.last().is_some_and(|s| s.ident == "From")
            ))
        })
        .count();
    assert_eq!(conversions, 3);
}

#[test]
fn union_holder_api() {
    let input: DeriveInput = parse_quote! {
        #[cod(union = ShapeDef)]
        struct Shape(Option<ShapeDef>);
    };
    let file = expand(&input);

    assert!(impl_of(&file, "Encode").contains("UNION_EMPTY"));
    assert!(impl_of(&file, "Decode").contains("decode_member"));
    assert!(impl_of(&file, "CodEquals").contains("member_equals"));

    let inherent = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Impl(item) if item.trait_.is_none() => {
                Some(item.to_token_stream().to_string())
            }
            _ => None,
        })
        .unwrap();
    for method in ["fn new", "fn tag", "fn size", "fn get", "fn set"] {
        assert!(inherent.contains(method), "missing `{method}`");
    }
}

#[test]
fn build_errors_surface() {
    let input: DeriveInput = parse_quote! {
        #[cod(union = ShapeDef)]
        struct Shape(Option<u32>);
    };
    assert!(derive_cod(&input).is_err());

    let input: DeriveInput = parse_quote! {
        #[cod(def)]
        enum Empty { Nothing }
    };
    assert!(derive_cod(&input).is_err());

    let input: DeriveInput = parse_quote! {
        #[cod(component)]
        struct Person { name: String }
    };
    assert!(derive_cod(&input).is_err());
}

#[traced_test]
#[test]
fn generation_is_logged() {
    let input: DeriveInput = parse_quote! {
        #[cod(def)]
        enum ShapeDef {
            Square(Square),
        }
    };
    derive_cod(&input).unwrap();

    assert!(logs_contain("assigned union tag"));
    assert!(logs_contain("generating cod implementation"));

    let input: DeriveInput = parse_quote! {
        struct Person { name: String }
    };
    derive_cod(&input).unwrap();

    assert!(logs_contain("built record field"));
}
