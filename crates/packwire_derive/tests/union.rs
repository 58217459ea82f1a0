use packwire::{
    Alternative, DiscriminatedUnion, Encode, Error, Field, Result, Strategy, Wire, pack, unpack,
};

#[derive(Debug, Clone, PartialEq, Wire)]
struct Login {
    user: String,
    remember: bool,
}

#[derive(Debug, Clone, PartialEq, Wire)]
enum Request {
    Login(Login),
    Fetch { id: u64, fields: Vec<String> },
    Logout,
}

#[derive(Debug, Clone, PartialEq, Wire)]
#[wire(discriminant = "u8")]
enum Frame {
    #[wire(tag = 10)]
    Data(Vec<u8>),
    Ack(u32),
    #[wire(tag = 2)]
    Close,
}

#[derive(Debug, Clone, PartialEq, Wire)]
enum Tree {
    Leaf(i32),
    Node(Box<Tree>, Box<Tree>),
}

#[test]
fn test_union_layout() -> Result<()> {
    let request = Request::Login(Login {
        user: "ok".to_owned(),
        remember: true,
    });
    assert_eq!(
        pack(&request)?,
        [0, 0, 0, 0, 2, 0, 0, 0, b'o', b'k', 1]
    );

    assert_eq!(pack(&Request::Logout)?, [2, 0, 0, 0]);
    Ok(())
}

#[test]
fn test_union_round_trips_every_alternative() -> Result<()> {
    let requests = [
        Request::Login(Login {
            user: "ana".to_owned(),
            remember: false,
        }),
        Request::Fetch {
            id: u64::MAX,
            fields: vec!["a".to_owned(), "b".to_owned()],
        },
        Request::Logout,
    ];

    for request in &requests {
        assert_eq!(&unpack::<Request>(&pack(request)?)?, request);
    }
    assert_eq!(unpack::<Vec<Request>>(&pack(&requests.to_vec())?)?, requests);
    Ok(())
}

#[test]
fn test_union_rejects_unknown_discriminant() -> Result<()> {
    let mut bytes = pack(&Request::Logout)?;
    bytes[0] = 3;

    let err = unpack::<Request>(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownDiscriminant {
            type_name: "Request",
            discriminant: 3
        }
    ));
    assert!(err.is_protocol_mismatch());
    Ok(())
}

#[test]
fn test_explicit_tags_and_width() -> Result<()> {
    assert_eq!(pack(&Frame::Data(vec![7]))?, [10, 1, 0, 0, 0, 7]);
    assert_eq!(pack(&Frame::Ack(1))?, [11, 1, 0, 0, 0]);
    assert_eq!(pack(&Frame::Close)?, [2]);

    assert_eq!(unpack::<Frame>(&[11, 5, 0, 0, 0])?, Frame::Ack(5));
    assert!(matches!(
        unpack::<Frame>(&[0]),
        Err(Error::UnknownDiscriminant {
            type_name: "Frame",
            discriminant: 0
        })
    ));
    Ok(())
}

#[test]
fn test_union_metadata() {
    assert_eq!(<Request as Encode>::STRATEGY, Strategy::DiscriminatedUnion);
    assert_eq!(<Request as DiscriminatedUnion>::NAME, "Request");

    let alternatives = <Request as DiscriminatedUnion>::ALTERNATIVES;
    assert_eq!(
        alternatives
            .iter()
            .map(|alt| (alt.name, alt.discriminant))
            .collect::<Vec<_>>(),
        [("Login", 0), ("Fetch", 1), ("Logout", 2)]
    );
    assert_eq!(alternatives[0].fields, [Field::new("0", Strategy::Composite)]);
    assert_eq!(
        alternatives[1].fields,
        [
            Field::new("id", Strategy::Primitive),
            Field::new("fields", Strategy::Sequence),
        ]
    );
    assert_eq!(alternatives[2], Alternative::new("Logout", 2, &[]));

    let fetch = Request::Fetch {
        id: 1,
        fields: Vec::new(),
    };
    assert_eq!(fetch.discriminant(), 1);
    assert_eq!(fetch.alternative().map(|alt| alt.name), Some("Fetch"));
    assert_eq!(Frame::Close.discriminant(), 2);
}

#[test]
fn test_recursive_union() -> Result<()> {
    let tree = Tree::Node(
        Box::new(Tree::Leaf(1)),
        Box::new(Tree::Node(Box::new(Tree::Leaf(2)), Box::new(Tree::Leaf(3)))),
    );
    let bytes = pack(&tree)?;
    assert_eq!(bytes.len(), 4 + (4 + 4) + (4 + (4 + 4) + (4 + 4)));
    assert_eq!(unpack::<Tree>(&bytes)?, tree);
    Ok(())
}

#[test]
fn test_recursive_union_respects_depth_limit() -> Result<()> {
    let mut tree = Tree::Leaf(0);
    for i in 1..=10 {
        tree = Tree::Node(Box::new(tree), Box::new(Tree::Leaf(i)));
    }
    let bytes = pack(&tree)?;

    let options = packwire::Options::new().with_max_depth(5);
    assert!(matches!(
        packwire::unpack_with::<Tree>(&bytes, options),
        Err(Error::DepthLimitExceeded { limit: 5 })
    ));
    assert_eq!(unpack::<Tree>(&bytes)?, tree);
    Ok(())
}
