//! The decoded instruction as handed over by a decoder.
//!
//! Formatters only ever read from an [`Instruction`]. Which fields hold meaningful data is
//! decided by the operand kinds, so every read goes through the accessor matching the kind.

use crate::opcode::Opcode;
use crate::register::Register;

/// Default operand and address size of the code an instruction was decoded from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CodeSize {
    Code16,
    Code32,
    Code64,
}

impl CodeSize {
    /// Default address size in bytes.
    pub fn address_size(self) -> u8 {
        match self {
            CodeSize::Code16 => 2,
            CodeSize::Code32 => 4,
            CodeSize::Code64 => 8,
        }
    }
}

/// What an instruction operand holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum OpKind {
    Register,
    NearBranch16,
    NearBranch32,
    NearBranch64,
    FarBranch16,
    FarBranch32,
    Immediate8,
    /// The second 8-bit immediate of `enter` and `extrq`/`insertq`.
    Immediate8_2nd,
    Immediate16,
    Immediate32,
    Immediate64,
    Immediate8to16,
    Immediate8to32,
    Immediate8to64,
    Immediate32to64,
    /// `seg:[si]`, `seg:[esi]` and `seg:[rsi]` of string instructions.
    MemorySegSI,
    MemorySegESI,
    MemorySegRSI,
    /// `seg:[di]` forms used by `maskmovq` and friends.
    MemorySegDI,
    MemorySegEDI,
    MemorySegRDI,
    /// `es:[di]` forms of string instructions, the segment can't be overridden.
    MemoryESDI,
    MemoryESEDI,
    MemoryESRDI,
    /// `seg:[base+index*scale+displ]`.
    Memory,
}

impl OpKind {
    pub fn is_memory(self) -> bool {
        matches!(
            self,
            OpKind::MemorySegSI
                | OpKind::MemorySegESI
                | OpKind::MemorySegRSI
                | OpKind::MemorySegDI
                | OpKind::MemorySegEDI
                | OpKind::MemorySegRDI
                | OpKind::MemoryESDI
                | OpKind::MemoryESEDI
                | OpKind::MemoryESRDI
                | OpKind::Memory
        )
    }

    pub fn is_immediate(self) -> bool {
        matches!(
            self,
            OpKind::Immediate8
                | OpKind::Immediate8_2nd
                | OpKind::Immediate16
                | OpKind::Immediate32
                | OpKind::Immediate64
                | OpKind::Immediate8to16
                | OpKind::Immediate8to32
                | OpKind::Immediate8to64
                | OpKind::Immediate32to64
        )
    }

    pub fn is_sign_extended(self) -> bool {
        matches!(
            self,
            OpKind::Immediate8to16
                | OpKind::Immediate8to32
                | OpKind::Immediate8to64
                | OpKind::Immediate32to64
        )
    }
}

/// Size of the data a memory operand accesses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum MemorySize {
    Unknown,
    Byte,
    Word,
    Dword,
    /// 6 bytes, the pseudo descriptor of `lgdt` and friends.
    Fword,
    Qword,
    Tbyte,
    Xmmword,
    Ymmword,
    Zmmword,
    Float32,
    Float64,
    Float80,
    /// Packed BCD of `fbld`/`fbstp`.
    Bcd,
    FarPtr16_16,
    FarPtr16_32,
    FarPtr16_64,
}

impl MemorySize {
    /// Number of bytes accessed, 0 if unknown.
    pub fn size(self) -> u8 {
        match self {
            MemorySize::Unknown => 0,
            MemorySize::Byte => 1,
            MemorySize::Word => 2,
            MemorySize::Dword | MemorySize::Float32 | MemorySize::FarPtr16_16 => 4,
            MemorySize::Fword | MemorySize::FarPtr16_32 => 6,
            MemorySize::Qword | MemorySize::Float64 => 8,
            MemorySize::Tbyte | MemorySize::Float80 | MemorySize::Bcd => 10,
            MemorySize::FarPtr16_64 => 10,
            MemorySize::Xmmword => 16,
            MemorySize::Ymmword => 32,
            MemorySize::Zmmword => 64,
        }
    }

    pub fn is_far_pointer(self) -> bool {
        matches!(
            self,
            MemorySize::FarPtr16_16 | MemorySize::FarPtr16_32 | MemorySize::FarPtr16_64
        )
    }
}

bitflags::bitflags! {
    /// Legacy prefixes the decoder saw. Segment overrides are kept separately as a register.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Prefixes: u8 {
        const LOCK = 1 << 0;
        const REP = 1 << 1;
        const REPNE = 1 << 2;
        const XACQUIRE = 1 << 3;
        const XRELEASE = 1 << 4;
        const OPERAND_SIZE = 1 << 5;
        const ADDRESS_SIZE = 1 << 6;
    }
}

/// avx512 static rounding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RoundingControl {
    None,
    RoundToNearest,
    RoundDown,
    RoundUp,
    RoundTowardZero,
}

impl RoundingControl {
    pub(crate) fn decorator(self) -> Option<&'static str> {
        match self {
            RoundingControl::None => None,
            RoundingControl::RoundToNearest => Some("rn-sae"),
            RoundingControl::RoundDown => Some("rd-sae"),
            RoundingControl::RoundUp => Some("ru-sae"),
            RoundingControl::RoundTowardZero => Some("rz-sae"),
        }
    }
}

/// Knights Corner register swizzles and memory up/down conversions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MvexConversion {
    None,
    Cdab,
    Badc,
    Dacb,
    Aaaa,
    Bbbb,
    Cccc,
    Dddd,
    Float16,
    Sint8,
    Uint8,
    Sint16,
    Uint16,
}

impl MvexConversion {
    pub(crate) fn decorator(self) -> Option<&'static str> {
        Some(match self {
            MvexConversion::None => return None,
            MvexConversion::Cdab => "cdab",
            MvexConversion::Badc => "badc",
            MvexConversion::Dacb => "dacb",
            MvexConversion::Aaaa => "aaaa",
            MvexConversion::Bbbb => "bbbb",
            MvexConversion::Cccc => "cccc",
            MvexConversion::Dddd => "dddd",
            MvexConversion::Float16 => "float16",
            MvexConversion::Sint8 => "sint8",
            MvexConversion::Uint8 => "uint8",
            MvexConversion::Sint16 => "sint16",
            MvexConversion::Uint16 => "uint16",
        })
    }

    /// Register swizzles go on register operands, the rest on memory operands.
    pub(crate) fn is_swizzle(self) -> bool {
        matches!(
            self,
            MvexConversion::Cdab
                | MvexConversion::Badc
                | MvexConversion::Dacb
                | MvexConversion::Aaaa
                | MvexConversion::Bbbb
                | MvexConversion::Cccc
                | MvexConversion::Dddd
        )
    }
}

/// The explicit memory operand of an instruction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MemoryOperand {
    pub base: Register,
    pub index: Register,
    pub scale: u8,
    /// Displacement, sign extended to 64 bits.
    pub displacement: i64,
    /// Encoded size of the displacement in bytes: 0, 1, 2, 4 or 8.
    pub displ_size: u8,
    pub size: MemorySize,
}

impl MemoryOperand {
    pub fn new(
        base: Register,
        index: Register,
        scale: u8,
        displacement: i64,
        displ_size: u8,
        size: MemorySize,
    ) -> Self {
        Self {
            base,
            index,
            scale,
            displacement,
            displ_size,
            size,
        }
    }

    /// `[base]`
    pub fn with_base(base: Register, size: MemorySize) -> Self {
        Self::new(base, Register::NONE, 1, 0, 0, size)
    }

    /// `[base+displ]` with the smallest displacement encoding that fits.
    pub fn with_base_displ(base: Register, displacement: i64, size: MemorySize) -> Self {
        let displ_size = if i8::try_from(displacement).is_ok() { 1 } else { 4 };
        Self::new(base, Register::NONE, 1, displacement, displ_size, size)
    }

    /// `[displ]`
    pub fn absolute(address: u64, displ_size: u8, size: MemorySize) -> Self {
        Self::new(Register::NONE, Register::NONE, 1, address as i64, displ_size, size)
    }
}

/// The decoded instruction consumed by the formatters.
///
/// Built through the `with_*` methods, which panic when given combinations a decoder would
/// never produce, such as more than five operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    code_size: CodeSize,
    ip: u64,
    len: u8,
    op_count: u8,
    op_kinds: [OpKind; 5],
    regs: [Register; 5],
    immediate: u64,
    immediate2: u8,
    near_branch: u64,
    short_branch: bool,
    far_selector: u16,
    far_offset: u32,
    mem: MemoryOperand,
    segment_prefix: Register,
    prefixes: Prefixes,
    op_mask: Register,
    zeroing: bool,
    rounding: RoundingControl,
    sae: bool,
    broadcast: bool,
    eviction_hint: bool,
    mvex_conversion: MvexConversion,
    data: [u8; 16],
    data_len: u8,
}

impl Instruction {
    pub fn new(code_size: CodeSize, opcode: Opcode) -> Self {
        Self {
            opcode,
            code_size,
            ip: 0,
            len: 0,
            op_count: 0,
            op_kinds: [OpKind::Register; 5],
            regs: [Register::NONE; 5],
            immediate: 0,
            immediate2: 0,
            near_branch: 0,
            short_branch: false,
            far_selector: 0,
            far_offset: 0,
            mem: MemoryOperand::with_base(Register::NONE, MemorySize::Unknown),
            segment_prefix: Register::NONE,
            prefixes: Prefixes::empty(),
            op_mask: Register::NONE,
            zeroing: false,
            rounding: RoundingControl::None,
            sae: false,
            broadcast: false,
            eviction_hint: false,
            mvex_conversion: MvexConversion::None,
            data: [0; 16],
            data_len: 0,
        }
    }

    fn push(&mut self, kind: OpKind) -> usize {
        let idx = self.op_count as usize;
        assert!(idx < 5, "an instruction has at most 5 operands");
        self.op_kinds[idx] = kind;
        self.op_count += 1;
        idx
    }

    /// Address and encoded length, both needed for `rip`-relative operands.
    pub fn with_ip(mut self, ip: u64, len: u8) -> Self {
        self.ip = ip;
        self.len = len;
        self
    }

    pub fn with_register(mut self, reg: Register) -> Self {
        let idx = self.push(OpKind::Register);
        self.regs[idx] = reg;
        self
    }

    /// Adds an immediate operand. `value` holds the encoded bits, sign extension is done
    /// when the operand is read.
    pub fn with_immediate(mut self, kind: OpKind, value: u64) -> Self {
        assert!(kind.is_immediate(), "{kind:?} isn't an immediate");
        self.push(kind);
        if kind == OpKind::Immediate8_2nd {
            self.immediate2 = value as u8;
        } else {
            self.immediate = value;
        }
        self
    }

    pub fn with_near_branch(mut self, kind: OpKind, target: u64) -> Self {
        assert!(
            matches!(
                kind,
                OpKind::NearBranch16 | OpKind::NearBranch32 | OpKind::NearBranch64
            ),
            "{kind:?} isn't a near branch"
        );
        self.push(kind);
        self.near_branch = target;
        self
    }

    /// Marks a near branch as using the 8-bit displacement encoding.
    pub fn with_short_branch(mut self) -> Self {
        self.short_branch = true;
        self
    }

    pub fn with_far_branch(mut self, kind: OpKind, selector: u16, offset: u32) -> Self {
        assert!(
            matches!(kind, OpKind::FarBranch16 | OpKind::FarBranch32),
            "{kind:?} isn't a far branch"
        );
        self.push(kind);
        self.far_selector = selector;
        self.far_offset = offset;
        self
    }

    pub fn with_memory(mut self, mem: MemoryOperand) -> Self {
        self.push(OpKind::Memory);
        self.mem = mem;
        self
    }

    /// Adds one of the implicit string operand forms, accessing `size` bytes.
    pub fn with_string_memory(mut self, kind: OpKind, size: MemorySize) -> Self {
        assert!(
            kind.is_memory() && kind != OpKind::Memory,
            "{kind:?} isn't a string operand"
        );
        self.push(kind);
        self.mem.size = size;
        self
    }

    pub fn with_segment_prefix(mut self, segment: Register) -> Self {
        self.segment_prefix = segment;
        self
    }

    pub fn with_prefixes(mut self, prefixes: Prefixes) -> Self {
        self.prefixes |= prefixes;
        self
    }

    pub fn with_op_mask(mut self, mask: Register) -> Self {
        self.op_mask = mask;
        self
    }

    pub fn with_zeroing(mut self) -> Self {
        self.zeroing = true;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingControl) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_sae(mut self) -> Self {
        self.sae = true;
        self
    }

    pub fn with_broadcast(mut self) -> Self {
        self.broadcast = true;
        self
    }

    pub fn with_eviction_hint(mut self) -> Self {
        self.eviction_hint = true;
        self
    }

    pub fn with_mvex_conversion(mut self, conversion: MvexConversion) -> Self {
        self.mvex_conversion = conversion;
        self
    }

    /// A `db` directive holding `bytes`.
    pub fn declare_bytes(code_size: CodeSize, bytes: &[u8]) -> Self {
        Self::declare(code_size, Opcode::Db, bytes)
    }

    pub fn declare_words(code_size: CodeSize, words: &[u16]) -> Self {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        Self::declare(code_size, Opcode::Dw, &bytes)
    }

    pub fn declare_dwords(code_size: CodeSize, dwords: &[u32]) -> Self {
        let bytes: Vec<u8> = dwords.iter().flat_map(|d| d.to_le_bytes()).collect();
        Self::declare(code_size, Opcode::Dd, &bytes)
    }

    pub fn declare_qwords(code_size: CodeSize, qwords: &[u64]) -> Self {
        let bytes: Vec<u8> = qwords.iter().flat_map(|q| q.to_le_bytes()).collect();
        Self::declare(code_size, Opcode::Dq, &bytes)
    }

    fn declare(code_size: CodeSize, opcode: Opcode, bytes: &[u8]) -> Self {
        assert!(
            !bytes.is_empty() && bytes.len() <= 16,
            "declared data holds 1 to 16 bytes"
        );
        let mut instr = Self::new(code_size, opcode);
        instr.data[..bytes.len()].copy_from_slice(bytes);
        instr.data_len = bytes.len() as u8;
        instr.len = bytes.len() as u8;
        instr
    }

    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    #[inline]
    pub fn code_size(&self) -> CodeSize {
        self.code_size
    }

    #[inline]
    pub fn ip(&self) -> u64 {
        self.ip
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Address of the following instruction.
    #[inline]
    pub fn next_ip(&self) -> u64 {
        self.ip.wrapping_add(self.len as u64)
    }

    #[inline]
    pub fn op_count(&self) -> u32 {
        self.op_count as u32
    }

    /// Kind of operand `idx`.
    ///
    /// # Panics
    /// if `idx` isn't below [`Instruction::op_count`].
    pub fn op_kind(&self, idx: u32) -> OpKind {
        assert!(idx < self.op_count as u32, "operand {idx} doesn't exist");
        self.op_kinds[idx as usize]
    }

    pub fn op_kinds(&self) -> &[OpKind] {
        &self.op_kinds[..self.op_count as usize]
    }

    /// Register of operand `idx`, [`Register::NONE`] if it's not a register operand.
    pub fn op_register(&self, idx: u32) -> Register {
        if self.op_kind(idx) == OpKind::Register {
            self.regs[idx as usize]
        } else {
            Register::NONE
        }
    }

    pub fn has_memory_operand(&self) -> bool {
        self.op_kinds().iter().any(|kind| kind.is_memory())
    }

    /// Value of immediate operand `idx`, sign extended as the kind says, and its width in bytes.
    pub fn immediate(&self, idx: u32) -> (u64, u8) {
        let imm = self.immediate;
        match self.op_kind(idx) {
            OpKind::Immediate8 => (imm as u8 as u64, 1),
            OpKind::Immediate8_2nd => (self.immediate2 as u64, 1),
            OpKind::Immediate16 => (imm as u16 as u64, 2),
            OpKind::Immediate32 => (imm as u32 as u64, 4),
            OpKind::Immediate64 => (imm, 8),
            OpKind::Immediate8to16 => (imm as i8 as i16 as u16 as u64, 2),
            OpKind::Immediate8to32 => (imm as i8 as i32 as u32 as u64, 4),
            OpKind::Immediate8to64 => (imm as i8 as i64 as u64, 8),
            OpKind::Immediate32to64 => (imm as i32 as i64 as u64, 8),
            kind => panic!("operand {idx} is {kind:?}, not an immediate"),
        }
    }

    #[inline]
    pub fn near_branch_target(&self) -> u64 {
        self.near_branch
    }

    #[inline]
    pub fn is_short_branch(&self) -> bool {
        self.short_branch
    }

    #[inline]
    pub fn far_branch_selector(&self) -> u16 {
        self.far_selector
    }

    #[inline]
    pub fn far_branch_offset(&self) -> u32 {
        self.far_offset
    }

    #[inline]
    pub fn memory(&self) -> &MemoryOperand {
        &self.mem
    }

    #[inline]
    pub fn memory_size(&self) -> MemorySize {
        self.mem.size
    }

    /// Segment override prefix, [`Register::NONE`] if there's none.
    #[inline]
    pub fn segment_prefix(&self) -> Register {
        self.segment_prefix
    }

    #[inline]
    pub fn prefixes(&self) -> Prefixes {
        self.prefixes
    }

    #[inline]
    pub fn op_mask(&self) -> Register {
        self.op_mask
    }

    #[inline]
    pub fn zeroing_masking(&self) -> bool {
        self.zeroing
    }

    #[inline]
    pub fn rounding_control(&self) -> RoundingControl {
        self.rounding
    }

    #[inline]
    pub fn suppress_all_exceptions(&self) -> bool {
        self.sae
    }

    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.broadcast
    }

    #[inline]
    pub fn eviction_hint(&self) -> bool {
        self.eviction_hint
    }

    #[inline]
    pub fn mvex_conversion(&self) -> MvexConversion {
        self.mvex_conversion
    }

    /// Bytes of a `db`/`dw`/`dd`/`dq` directive.
    pub fn declared_data(&self) -> &[u8] {
        &self.data[..self.data_len as usize]
    }

    /// Element `idx` of a data directive, with elements `width` bytes wide.
    pub(crate) fn declared_element(&self, idx: usize, width: usize) -> u64 {
        let mut bytes = [0u8; 8];
        bytes[..width].copy_from_slice(&self.data[idx * width..(idx + 1) * width]);
        u64::from_le_bytes(bytes)
    }

    /// Segment used by a memory operand of `kind` when there's no override.
    pub(crate) fn default_segment(&self, kind: OpKind) -> Register {
        match kind {
            OpKind::MemoryESDI | OpKind::MemoryESEDI | OpKind::MemoryESRDI => Register::es(),
            OpKind::Memory if self.mem.base.is_stack_base() => Register::ss(),
            _ => Register::ds(),
        }
    }
}
