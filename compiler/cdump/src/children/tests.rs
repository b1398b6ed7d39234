use cdump_ir::{ArenaBuilder, NodeArena, NodeId, Qualifiers, TypeFields, TypeKind};
use pretty_assertions::assert_eq;

use crate::{dump_roots, DumpConfig, DumpId, DumpRecord, MemorySink, RecordKind};

/// Unqualified builtin plus its unqualified wrapper.
fn builtin(builder: &mut ArenaBuilder, name: &str) -> (NodeId, NodeId) {
    let ty = builder.add_type(name, None, TypeFields::default()).unwrap();
    let qual = builder.add_qual_type(ty, Qualifiers::empty()).unwrap();
    (ty, qual)
}

struct Dumped {
    sink: MemorySink,
    roots: Vec<DumpId>,
}

impl Dumped {
    fn run(arena: &NodeArena, roots: &[NodeId]) -> Self {
        let mut sink = MemorySink::new();
        let summary = dump_roots(arena, roots, &mut sink, &DumpConfig::default()).unwrap();
        Dumped {
            sink,
            roots: summary.roots,
        }
    }

    fn record(&self, id: DumpId) -> &DumpRecord {
        self.sink.get(id).unwrap()
    }

    fn root(&self, index: usize) -> &DumpRecord {
        self.record(self.roots[index])
    }

    /// Id `node` got in this run; `node` must be one of `roots`.
    fn id_of(&self, roots: &[NodeId], node: NodeId) -> DumpId {
        let index = roots.iter().position(|&n| n == node).unwrap();
        self.roots[index]
    }
}

#[test]
fn generic_without_sugar_has_no_children() {
    let mut builder = ArenaBuilder::new();
    let (int, _) = builtin(&mut builder, "BuiltinType");
    let arena = builder.finish().unwrap();

    let dumped = Dumped::run(&arena, &[int]);
    assert_eq!(dumped.root(0).kind, RecordKind::Type(TypeKind::Type));
    assert_eq!(dumped.root(0).children, vec![]);
}

#[test]
fn self_desugar_link_adds_nothing() {
    let mut builder = ArenaBuilder::new();
    let id = builder.reserve();
    builder
        .define_type(id, "BuiltinType", Some(id), TypeFields::default())
        .unwrap();
    let arena = builder.finish().unwrap();

    let dumped = Dumped::run(&arena, &[id]);
    assert_eq!(dumped.root(0).children, vec![]);
    assert_eq!(dumped.sink.len(), 1);
}

#[test]
fn sugar_adds_desugared_type() {
    let mut builder = ArenaBuilder::new();
    let (int, _) = builtin(&mut builder, "BuiltinType");
    let typedef = builder
        .add_type("TypedefType", Some(int), TypeFields::default())
        .unwrap();
    let arena = builder.finish().unwrap();

    let dumped = Dumped::run(&arena, &[typedef, int]);
    let int_id = dumped.id_of(&[typedef, int], int);
    assert_eq!(dumped.root(0).children, vec![int_id]);
}

#[test]
fn pointer_has_single_pointee_child() {
    let mut builder = ArenaBuilder::new();
    let (_, char_q) = builtin(&mut builder, "BuiltinType");
    let ptr = builder
        .add_type("PointerType", None, TypeFields::default().pointee(char_q))
        .unwrap();
    let arena = builder.finish().unwrap();

    let dumped = Dumped::run(&arena, &[ptr, char_q]);
    let pointee = dumped.id_of(&[ptr, char_q], char_q);
    assert_eq!(dumped.root(0).kind, RecordKind::Type(TypeKind::Pointer));
    assert_eq!(dumped.root(0).children, vec![pointee]);
}

#[test]
fn sugared_pointer_chains_desugar_step_first() {
    let mut builder = ArenaBuilder::new();
    let (_, int_q) = builtin(&mut builder, "BuiltinType");
    let canonical = builder
        .add_type("PointerType", None, TypeFields::default().pointee(int_q))
        .unwrap();
    let sugared = builder
        .add_type(
            "PointerType",
            Some(canonical),
            TypeFields::default().pointee(int_q),
        )
        .unwrap();
    let arena = builder.finish().unwrap();

    let roots = [sugared, canonical, int_q];
    let dumped = Dumped::run(&arena, &roots);
    assert_eq!(
        dumped.root(0).children,
        vec![
            dumped.id_of(&roots, canonical),
            dumped.id_of(&roots, int_q)
        ]
    );
}

#[test]
fn qualified_wrapper_has_exactly_its_underlying_type() {
    let mut builder = ArenaBuilder::new();
    let int = builder
        .add_type("BuiltinType", None, TypeFields::default())
        .unwrap();
    let const_int = builder.add_qual_type(int, Qualifiers::CONST).unwrap();
    let arena = builder.finish().unwrap();

    let roots = [const_int, int];
    let dumped = Dumped::run(&arena, &roots);
    assert_eq!(dumped.root(0).kind, RecordKind::QualType);
    assert_eq!(dumped.root(0).children, vec![dumped.id_of(&roots, int)]);
}

#[test]
fn proto_children_are_return_then_params() {
    let mut builder = ArenaBuilder::new();
    let (_, void_q) = builtin(&mut builder, "BuiltinType");
    let (_, int_q) = builtin(&mut builder, "BuiltinType");
    let (_, float_q) = builtin(&mut builder, "BuiltinType");
    let (_, exc_q) = builtin(&mut builder, "RecordTypeStub");
    let guard = builder.add_stmt("CXXBoolLiteralExpr", []).unwrap();
    let source = builder.add_decl("FunctionDecl", []).unwrap();
    let template = builder.add_decl("FunctionTemplateDecl", []).unwrap();
    let proto = builder
        .add_type(
            "FunctionProtoType",
            None,
            TypeFields::default()
                .return_type(void_q)
                .params([int_q, float_q, int_q])
                .exceptions([exc_q])
                .noexcept_expr(guard)
                .source_decl(source)
                .source_template(template),
        )
        .unwrap();
    let arena = builder.finish().unwrap();

    let roots = [proto, void_q, int_q, float_q, exc_q, guard, source, template];
    let dumped = Dumped::run(&arena, &roots);
    let id = |node| dumped.id_of(&roots, node);

    assert_eq!(dumped.root(0).kind, RecordKind::Type(TypeKind::FunctionProto));
    assert_eq!(
        dumped.root(0).children,
        vec![id(void_q), id(int_q), id(float_q), id(int_q)]
    );
    // Dumping the function type alone still reaches every auxiliary node...
    let only_proto = Dumped::run(&arena, &[proto]);
    assert_eq!(only_proto.sink.len(), arena.len());
    // ...but none of them is a child.
    for aux in [exc_q, guard, source, template] {
        assert!(!dumped.root(0).children.contains(&id(aux)));
    }
}

#[test]
fn unprototyped_function_has_return_type_only() {
    let mut builder = ArenaBuilder::new();
    let (_, int_q) = builtin(&mut builder, "BuiltinType");
    let func = builder
        .add_type(
            "FunctionNoProtoType",
            None,
            TypeFields::default().return_type(int_q).params([int_q]),
        )
        .unwrap();
    let arena = builder.finish().unwrap();

    let roots = [func, int_q];
    let dumped = Dumped::run(&arena, &roots);
    assert_eq!(dumped.root(0).kind, RecordKind::Type(TypeKind::Function));
    assert_eq!(dumped.root(0).children, vec![dumped.id_of(&roots, int_q)]);
}

#[test]
fn array_kinds_share_the_element_rule() {
    for class in [
        "ConstantArrayType",
        "DependentSizedArrayType",
        "IncompleteArrayType",
    ] {
        let mut builder = ArenaBuilder::new();
        let (_, int_q) = builtin(&mut builder, "BuiltinType");
        let array = builder
            .add_type(class, None, TypeFields::default().element(int_q))
            .unwrap();
        let arena = builder.finish().unwrap();

        let roots = [array, int_q];
        let dumped = Dumped::run(&arena, &roots);
        assert_eq!(dumped.root(0).kind, RecordKind::Type(TypeKind::Array));
        assert_eq!(dumped.root(0).children, vec![dumped.id_of(&roots, int_q)], "{class}");
    }
}

#[test]
fn variable_array_size_expression_is_last() {
    let mut builder = ArenaBuilder::new();
    let (_, int_q) = builtin(&mut builder, "BuiltinType");
    let n = builder.add_stmt("DeclRefExpr", []).unwrap();
    let fields = TypeFields::default().element(int_q).size_expr(n);
    let canonical = builder
        .add_type("VariableArrayType", None, fields.clone())
        .unwrap();
    let sugared = builder
        .add_type("VariableArrayType", Some(canonical), fields)
        .unwrap();
    let arena = builder.finish().unwrap();

    let roots = [sugared, canonical, int_q, n];
    let dumped = Dumped::run(&arena, &roots);
    let id = |node| dumped.id_of(&roots, node);
    assert_eq!(
        dumped.root(0).kind,
        RecordKind::Type(TypeKind::VariableArray)
    );
    assert_eq!(dumped.root(0).children, vec![id(canonical), id(int_q), id(n)]);
    assert_eq!(dumped.root(1).children, vec![id(int_q), id(n)]);
    assert_eq!(dumped.record(id(n)).kind, RecordKind::Stmt);
}

#[test]
fn tag_type_dumps_its_declaration_on_the_side() {
    let mut builder = ArenaBuilder::new();
    let record = builder.add_decl("CXXRecordDecl", []).unwrap();
    let tag = builder
        .add_type("RecordType", None, TypeFields::default().decl(record))
        .unwrap();
    let arena = builder.finish().unwrap();

    let only_tag = Dumped::run(&arena, &[tag]);
    assert_eq!(only_tag.root(0).kind, RecordKind::Type(TypeKind::Tag));
    assert_eq!(only_tag.root(0).children, vec![]);
    assert_eq!(only_tag.sink.len(), 2);
    let kinds: Vec<_> = only_tag.sink.records().iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![RecordKind::Decl, RecordKind::Type(TypeKind::Tag)]);
}

#[test]
fn tag_type_skips_the_desugar_step() {
    let mut builder = ArenaBuilder::new();
    let (canonical, _) = builtin(&mut builder, "BuiltinType");
    let decl = builder.add_decl("EnumDecl", []).unwrap();
    let tag = builder
        .add_type("EnumType", Some(canonical), TypeFields::default().decl(decl))
        .unwrap();
    let arena = builder.finish().unwrap();

    let dumped = Dumped::run(&arena, &[tag]);
    assert_eq!(dumped.root(0).children, vec![]);
    let kinds: Vec<_> = dumped.sink.records().iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![RecordKind::Decl, RecordKind::Type(TypeKind::Tag)]);
}

#[test]
fn opaque_children_keep_declared_order() {
    let mut builder = ArenaBuilder::new();
    let (int, int_q) = builtin(&mut builder, "BuiltinType");
    let init = builder.add_stmt("IntegerLiteral", []).unwrap();
    let var = builder.add_decl("VarDecl", [int_q, init, int]).unwrap();
    let arena = builder.finish().unwrap();

    let roots = [var, int_q, init, int];
    let dumped = Dumped::run(&arena, &roots);
    let id = |node| dumped.id_of(&roots, node);
    assert_eq!(dumped.root(0).kind, RecordKind::Decl);
    assert_eq!(dumped.root(0).children, vec![id(int_q), id(init), id(int)]);
}
